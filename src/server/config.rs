use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslMethod};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::api::user::UserData;
use crate::config::{check_range, CommonConfig, PathSet};
use crate::dirs;
use crate::router::Router;

use super::auth::jwt::{JwtTokenGenerator, JwtTokenValidator};
use super::auth::rsa;
use super::context::ServerContext;
use super::restful::RestfulServer;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: String,

    #[serde(default)]
    pub ssl: bool,

    pub keep_alive_secs: Option<u64>,

    pub workers: Option<u64>,

    #[serde(default = "ServerConfig::default_token_expiration_secs")]
    pub token_expiration_secs: u64,

    /// The portal's user directory. The web application's backend owns the
    /// real one; the portal assigns roles here.
    #[serde(default = "ServerConfig::default_users")]
    pub users: Vec<UserAccount>,

    #[serde(skip)]
    pki_dir: PathBuf,
}

/// One account of the portal. `password` holds the sha256 hex digest of the
/// plain password concatenated with `salt`; the `ideahub password` command
/// prints both fields.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserAccount {
    pub name: String,

    pub password: String,

    pub salt: String,

    pub role: String,

    #[serde(default)]
    pub id: u64,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub profile: String,
}

impl UserAccount {
    pub fn user_data(&self) -> UserData {
        UserData {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            phone: self.phone.clone(),
            profile: self.profile.clone(),
        }
    }
}

static NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: Self::default_bind(),
            ssl: false,
            keep_alive_secs: None,
            workers: None,
            token_expiration_secs: Self::default_token_expiration_secs(),
            users: Self::default_users(),
            pki_dir: PathBuf::new(),
        }
    }
}

impl CommonConfig for ServerConfig {
    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        if self.bind.is_empty() {
            bail!("bind is required");
        }

        check_range(
            "token_expiration_secs",
            self.token_expiration_secs,
            Self::MIN_TOKEN_EXPIRATION_SECS,
            Self::MAX_TOKEN_EXPIRATION_SECS,
        )?;

        if let Some(keep_alive_secs) = self.keep_alive_secs {
            if keep_alive_secs == 0 {
                bail!("keep_alive_secs must be greater than 0");
            }
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                bail!("workers must be greater than 0");
            }
        }

        if self.users.is_empty() {
            bail!("at least one user account is required");
        }
        for (idx, account) in self.users.iter().enumerate() {
            account
                .validate()
                .with_context(|| format!("validate user account at index {idx}"))?;
        }
        for account in self.users.iter() {
            let count = self.users.iter().filter(|u| u.name == account.name).count();
            if count > 1 {
                bail!("duplicate user account '{}'", account.name);
            }
        }
        if self
            .users
            .iter()
            .any(|u| u.password == Self::DEFAULT_ADMIN_PASSWORD_HASH)
        {
            warn!("Using default admin password IS DANGEROUS, please change it in production");
        }

        self.pki_dir = ps.pki_dir.clone();
        dirs::ensure_dir_exists(&self.pki_dir).context("ensure pki dir")?;

        Ok(())
    }
}

impl UserAccount {
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("account name is required");
        }
        if !NAME_REGEX.is_match(&self.name) {
            bail!("invalid account name '{}'", self.name);
        }
        if self.password.len() != 64 || !self.password.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!(
                "account '{}' password must be a sha256 hex digest",
                self.name
            );
        }
        if self.salt.is_empty() {
            bail!("account '{}' salt is required", self.name);
        }
        if self.role.is_empty() {
            bail!("account '{}' role is required", self.name);
        }
        Ok(())
    }
}

impl ServerConfig {
    const MIN_TOKEN_EXPIRATION_SECS: u64 = 60;
    const MAX_TOKEN_EXPIRATION_SECS: u64 = 60 * 60 * 24 * 365;

    /// sha256("admin_password123" + default salt)
    const DEFAULT_ADMIN_PASSWORD_HASH: &'static str =
        "3e752a9e84e719d1876255ef747b8788aacb95e23d3a1d1aac481e222ccb6558";

    pub fn build_ctx(&self) -> Result<Arc<ServerContext>> {
        let router = Router::load().context("load route registry")?;

        // An account role that resolves to no policy is a configuration typo
        for account in self.users.iter() {
            if router.evaluator().policies().get(&account.role).is_none() {
                bail!(
                    "account '{}' has unknown role '{}'",
                    account.name,
                    account.role
                );
            }
        }

        let (token_public, token_private) = self.read_jwt_keys()?;
        let jwt_generator = JwtTokenGenerator::new(&token_private, self.token_expiration_secs)
            .context("init jwt token generator")?;
        let jwt_validator =
            JwtTokenValidator::new(&token_public).context("init jwt token validator")?;

        let ctx = ServerContext {
            cfg: self.clone(),
            jwt_generator,
            jwt_validator,
            router,
        };
        Ok(Arc::new(ctx))
    }

    pub fn build_restful_server(&self, ctx: Arc<ServerContext>) -> Result<RestfulServer> {
        let mut srv = RestfulServer::new(self.bind.clone(), ctx);
        if self.ssl {
            let ssl = self.build_ssl()?;
            srv.set_ssl(ssl);
        }

        if let Some(keep_alive_secs) = self.keep_alive_secs {
            srv.set_keep_alive_secs(keep_alive_secs);
        }

        if let Some(workers) = self.workers {
            srv.set_workers(workers);
        }

        Ok(srv)
    }

    fn read_jwt_keys(&self) -> Result<(Vec<u8>, Vec<u8>)> {
        let public_key_path = self.pki_dir.join("token_public.pem");
        let private_key_path = self.pki_dir.join("token_private.pem");
        if public_key_path.exists() && private_key_path.exists() {
            let public_key = fs::read(&public_key_path).context("read token public key")?;
            let private_key = fs::read(&private_key_path).context("read token private key")?;
            return Ok((public_key, private_key));
        }

        info!("Token keys for jwt not exists, try to generate new ones");
        let (public_key, private_key) =
            rsa::generate_rsa_keys().context("generate keys for token")?;

        fs::write(&public_key_path, &public_key).context("write token public key")?;
        fs::write(&private_key_path, &private_key).context("write token private key")?;

        Ok((public_key, private_key))
    }

    fn build_ssl(&self) -> Result<SslAcceptorBuilder> {
        let key_path = self.pki_dir.join("key.pem");
        if !key_path.exists() {
            bail!("ssl key file not exists: {:?}", key_path);
        }

        let cert_path = self.pki_dir.join("cert.pem");
        if !cert_path.exists() {
            bail!("ssl cert file not exists: {:?}", cert_path);
        }

        let mut builder =
            SslAcceptor::mozilla_intermediate(SslMethod::tls()).context("init ssl acceptor")?;

        builder
            .set_private_key_file(&key_path, openssl::ssl::SslFiletype::PEM)
            .context("load ssl key file")?;
        builder
            .set_certificate_chain_file(&cert_path)
            .context("load ssl cert file")?;

        Ok(builder)
    }

    fn default_bind() -> String {
        String::from("127.0.0.1:9960")
    }

    fn default_token_expiration_secs() -> u64 {
        60 * 60 // 1 hour
    }

    fn default_users() -> Vec<UserAccount> {
        vec![UserAccount {
            name: String::from("admin"),
            password: String::from(Self::DEFAULT_ADMIN_PASSWORD_HASH),
            salt: String::from("k3Wq9zL4pXv8"),
            role: String::from("administrator"),
            id: 1,
            email: String::from("admin@magick.example"),
            phone: String::new(),
            profile: String::new(),
        }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(mut cfg: ServerConfig) -> Result<()> {
        let ps = PathSet {
            config_dir: PathBuf::from("_test_server_config"),
            data_dir: PathBuf::from("_test_server_config/data"),
            pki_dir: PathBuf::from("_test_server_config/pki"),
        };
        let result = cfg.complete(&ps);
        let _ = fs::remove_dir_all("_test_server_config");
        result
    }

    #[test]
    fn test_default_config() {
        complete(ServerConfig::default()).unwrap();
    }

    #[test]
    fn test_invalid_configs() {
        let mut cfg = ServerConfig::default();
        cfg.bind = String::new();
        assert!(complete(cfg).is_err());

        let mut cfg = ServerConfig::default();
        cfg.token_expiration_secs = 10;
        assert!(complete(cfg).is_err());

        let mut cfg = ServerConfig::default();
        cfg.users.clear();
        assert!(complete(cfg).is_err());

        let mut cfg = ServerConfig::default();
        cfg.users[0].password = String::from("plaintext");
        assert!(complete(cfg).is_err());

        let mut cfg = ServerConfig::default();
        cfg.users.push(cfg.users[0].clone());
        assert!(complete(cfg).is_err());

        let mut cfg = ServerConfig::default();
        cfg.workers = Some(0);
        assert!(complete(cfg).is_err());
    }
}
