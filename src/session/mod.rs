use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::api::user::{TokenResponse, UserData};
use crate::filelock::{read_file_lock, write_file_lock};
use crate::time::current_timestamp;

/// The authenticated principal the portal is currently acting for.
///
/// An empty token means nobody is signed in; the router then only serves the
/// public tree. The evaluator re-reads this on every check, so swapping the
/// session takes effect on the very next call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub expire_after: u64,

    #[serde(default)]
    pub user_data: UserData,
}

impl SessionState {
    /// The session of a visitor that has not signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: String, user_data: UserData) -> Self {
        Self {
            token,
            expire_after: 0,
            user_data,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn login(&mut self, token: TokenResponse, user_data: UserData) {
        self.token = token.token;
        self.expire_after = token.expire_after;
        self.user_data = user_data;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Persists the login state across runs, the way the web app keeps it in
/// browser storage under its fixed key. Reads and writes go through a file
/// lock.
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    const FILE_NAME: &'static str = "login_state.json";

    pub fn new(data_dir: &std::path::Path) -> Self {
        Self {
            path: data_dir.join(Self::FILE_NAME),
        }
    }

    /// Loads the persisted session. Anything unusable (missing file, invalid
    /// json, expired token) degrades to the anonymous session rather than
    /// failing the command.
    pub fn load(&self) -> Result<SessionState> {
        let data = match read_file_lock(&self.path)? {
            Some(data) => data,
            None => return Ok(SessionState::anonymous()),
        };

        let state: SessionState = match serde_json::from_slice(&data) {
            Ok(state) => state,
            Err(_) => {
                warn!("Login state file has invalid data, we will ignore it");
                return Ok(SessionState::anonymous());
            }
        };

        if !state.is_authenticated() {
            return Ok(SessionState::anonymous());
        }

        if state.expire_after > 0 && current_timestamp() >= state.expire_after {
            info!("Login state has expired, please login again");
            return Ok(SessionState::anonymous());
        }

        Ok(state)
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        let data = serde_json::to_vec(state)?;
        write_file_lock(&self.path, &data)
            .with_context(|| format!("write login state file: {}", self.path.display()))?;
        Ok(())
    }

    /// Drops the persisted session. Missing file is fine; logout is
    /// idempotent.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove login state: {}", self.path.display()))
            }
        }
    }
}
