use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig, PathSet};
use crate::session::SessionFile;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    #[serde(default = "ClientConfig::default_server")]
    pub server: String,

    #[serde(default = "ClientConfig::default_user")]
    pub user: String,

    #[serde(default = "ClientConfig::default_password")]
    pub password: String,

    #[serde(skip)]
    data_dir: Option<std::path::PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: Self::default_server(),
            user: Self::default_user(),
            password: Self::default_password(),
            data_dir: None,
        }
    }
}

impl CommonConfig for ClientConfig {
    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        // The url is validated when the client connects
        self.server = expandenv("server", &self.server)?;
        if self.server.is_empty() {
            bail!("server cannot be empty");
        }

        self.user = expandenv("user", &self.user)?;
        if self.user.is_empty() {
            bail!("user cannot be empty");
        }

        self.password = expandenv("password", &self.password)?;
        if self.password.is_empty() {
            bail!("password cannot be empty");
        }

        self.data_dir = Some(ps.data_dir.clone());
        Ok(())
    }
}

impl ClientConfig {
    pub fn session_file(&self) -> SessionFile {
        let dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| std::path::PathBuf::from("."));
        SessionFile::new(&dir)
    }

    fn default_server() -> String {
        String::from("http://127.0.0.1:9960")
    }

    fn default_user() -> String {
        String::from("admin")
    }

    fn default_password() -> String {
        String::from("admin_password123")
    }
}
