use std::path::PathBuf;
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use clap::Args;
use log::warn;
use serde::de::DeserializeOwned;

use crate::dirs;

/// The set of directories a command works with. Config files live in the
/// config directory, mutable state (login state, logs) in the data directory,
/// and the server's key material in the pki directory.
pub struct PathSet {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    pub pki_dir: PathBuf,
}

impl PathSet {
    pub fn new(config_dir: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_dir = if let Some(dir) = config_dir {
            dir
        } else if let Ok(dir) = env::var("IDEAHUB_CONFIG") {
            PathBuf::from(dir)
        } else {
            dirs::config_dir()?
        };

        let data_dir = if let Some(dir) = data_dir {
            dir
        } else if let Ok(dir) = env::var("IDEAHUB_DATA") {
            PathBuf::from(dir)
        } else {
            dirs::data_dir()?
        };

        // PKI material is always kept under the config directory
        let pki_dir = config_dir.join("pki");

        dirs::ensure_dir_exists(&config_dir)
            .with_context(|| format!("ensure config directory: {}", config_dir.display()))?;
        dirs::ensure_dir_exists(&data_dir)
            .with_context(|| format!("ensure data directory: {}", data_dir.display()))?;

        Ok(Self {
            config_dir,
            data_dir,
            pki_dir,
        })
    }

    pub fn load_config<T>(&self, name: &str) -> Result<T>
    where
        T: CommonConfig + Default + DeserializeOwned,
    {
        let path = self.config_dir.join(format!("{name}.toml"));
        let mut cfg: T = match fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)
                .with_context(|| format!("parse config file: {}", path.display()))?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("Config file for {name} not found, using defaults");
                T::default()
            }
            Err(err) => {
                return Err(err).with_context(|| format!("read config file: {}", path.display()));
            }
        };

        cfg.complete(self).context("validate config")?;
        Ok(cfg)
    }
}

pub trait CommonConfig {
    fn complete(&mut self, ps: &PathSet) -> Result<()>;
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Override the config directory, defaults to `~/.config/ideahub`
    /// (`/etc/ideahub` when running as root) or `$IDEAHUB_CONFIG`.
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Override the data directory, defaults to `~/.local/share/ideahub`
    /// (`/var/lib/ideahub` when running as root) or `$IDEAHUB_DATA`.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn build_path_set(&self) -> Result<PathSet> {
        PathSet::new(self.config_dir.clone(), self.data_dir.clone())
    }

    pub fn load<T>(&self, name: &str) -> Result<T>
    where
        T: CommonConfig + Default + DeserializeOwned,
    {
        let ps = self.build_path_set()?;
        ps.load_config(name)
    }
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

/// Validates that a value sits inside an inclusive range, with the field name
/// in the error message.
pub fn check_range(name: &str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        bail!("{name} must be in range [{min}, {max}], found {value}");
    }
    Ok(())
}
