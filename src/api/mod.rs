pub mod nav;
pub mod user;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::time::current_timestamp;

pub const TOKEN_PATH: &str = "/api/token";
pub const WHOAMI_PATH: &str = "/api/whoami";
pub const NAV_PATH: &str = "/api/nav";
pub const CANI_PATH: &str = "/api/cani";
pub const ROUTES_PATH: &str = "/api/routes";
pub const PAGES_PATH: &str = "/pages";
pub const HEALTHZ_PATH: &str = "/healthz";

pub const HEADER_AUTHORIZATION: &str = "Authorization";

pub const STATUS_OK: u32 = 200;
pub const STATUS_BAD_REQUEST: u32 = 400;
pub const STATUS_UNAUTHORIZED: u32 = 401;
pub const STATUS_FORBIDDEN: u32 = 403;
pub const STATUS_NOT_FOUND: u32 = 404;
pub const STATUS_INTERNAL_SERVER_ERROR: u32 = 500;

/// The JSON envelope every endpoint answers with.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct Response<T: Serialize + DeserializeOwned> {
    pub code: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize + DeserializeOwned> Response<T> {
    pub fn ok() -> Self {
        Self {
            code: STATUS_OK,
            message: None,
            data: None,
        }
    }

    pub fn with_data(data: T) -> Self {
        Self {
            code: STATUS_OK,
            message: None,
            data: Some(data),
        }
    }

    pub fn bad_request(message: impl ToString) -> Self {
        Self {
            code: STATUS_BAD_REQUEST,
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn unauthorized(message: impl ToString) -> Self {
        Self {
            code: STATUS_UNAUTHORIZED,
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn forbidden() -> Self {
        Self {
            code: STATUS_FORBIDDEN,
            message: Some(String::from("Operation not allowed")),
            data: None,
        }
    }

    pub fn not_found(message: impl ToString) -> Self {
        Self {
            code: STATUS_NOT_FOUND,
            message: Some(message.to_string()),
            data: None,
        }
    }

    pub fn internal_server_error(message: impl ToString) -> Self {
        Self {
            code: STATUS_INTERNAL_SERVER_ERROR,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound = "T: Serialize + DeserializeOwned")]
pub struct ListResponse<T: Serialize + DeserializeOwned> {
    pub items: Vec<T>,
    pub total: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub version: String,
    pub timestamp: u64,
}

impl HealthResponse {
    pub fn now() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: current_timestamp(),
        }
    }
}
