pub mod config;

use anyhow::{bail, Result};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::nav::{NavItem, PageResolution, RouteInfo};
use crate::api::user::{AllowResponse, TokenResponse, UserData, WhoamiResponse};
use crate::api::{self, HealthResponse, ListResponse, Response};
use crate::code;

/// Error types that can occur during client requests
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("your session is not accepted by the server, please login again: {0}")]
    Unauthorized(String),

    #[error("server error: code {code}, {message}")]
    Server { code: u32, message: String },

    #[error("server returned invalid json: {0}")]
    InvalidJson(String),

    #[error("missing data in server response")]
    MissingData,
}

/// A thin client for the portal API. If the session token is set, every
/// outbound request carries it as a bearer credential.
pub struct ApiClient {
    url: String,
    client: reqwest::Client,
    token: Option<String>,
}

impl ApiClient {
    pub fn connect(url: &str) -> Result<Self> {
        let url = url.trim_end_matches('/');
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => bail!("invalid server url '{url}'"),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            _ => bail!(
                "invalid url scheme, expect 'http' or 'https', not '{}'",
                parsed.scheme()
            ),
        }
        if parsed.path() != "/" {
            bail!(
                "invalid server url, path should be '/', not '{}'",
                parsed.path()
            );
        }

        Ok(Self {
            url: url.to_string(),
            client: reqwest::Client::new(),
            token: None,
        })
    }

    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Exchanges basic credentials for a bearer token.
    pub async fn login(&self, user: &str, password: &str) -> Result<TokenResponse, RequestError> {
        let auth = format!("Basic {user}:{}", code::base64_encode(password));
        let resp: Response<TokenResponse> = self
            .do_request(api::TOKEN_PATH, &[], Some(auth))
            .await?;
        resp.data.ok_or(RequestError::MissingData)
    }

    pub async fn whoami(&self) -> Result<UserData, RequestError> {
        let resp: Response<WhoamiResponse> = self.do_request(api::WHOAMI_PATH, &[], None).await?;
        match resp.data {
            Some(data) => Ok(data.user),
            None => Err(RequestError::MissingData),
        }
    }

    pub async fn nav(&self) -> Result<Vec<NavItem>, RequestError> {
        let resp: Response<ListResponse<NavItem>> =
            self.do_request(api::NAV_PATH, &[], None).await?;
        match resp.data {
            Some(data) => Ok(data.items),
            None => Err(RequestError::MissingData),
        }
    }

    pub async fn routes(&self) -> Result<Vec<RouteInfo>, RequestError> {
        let resp: Response<ListResponse<RouteInfo>> =
            self.do_request(api::ROUTES_PATH, &[], None).await?;
        match resp.data {
            Some(data) => Ok(data.items),
            None => Err(RequestError::MissingData),
        }
    }

    pub async fn cani_path(&self, path: &str) -> Result<bool, RequestError> {
        let resp: Response<AllowResponse> = self
            .do_request(api::CANI_PATH, &[("path", path)], None)
            .await?;
        Ok(resp.data.map(|d| d.allow).unwrap_or(false))
    }

    pub async fn cani_feature(&self, feature: &str) -> Result<bool, RequestError> {
        let resp: Response<AllowResponse> = self
            .do_request(api::CANI_PATH, &[("feature", feature)], None)
            .await?;
        Ok(resp.data.map(|d| d.allow).unwrap_or(false))
    }

    pub async fn resolve_page(&self, pathname: &str) -> Result<PageResolution, RequestError> {
        let path = format!("{}/{}", api::PAGES_PATH, pathname.trim_start_matches('/'));
        let resp: Response<PageResolution> = self.do_request(&path, &[], None).await?;
        resp.data.ok_or(RequestError::MissingData)
    }

    pub async fn healthz(&self) -> Result<HealthResponse, RequestError> {
        let resp: Response<HealthResponse> = self.do_request(api::HEALTHZ_PATH, &[], None).await?;
        resp.data.ok_or(RequestError::MissingData)
    }

    async fn do_request<T>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        auth: Option<String>,
    ) -> Result<Response<T>, RequestError>
    where
        T: Serialize + DeserializeOwned,
    {
        let url = format!("{}{path}", self.url);
        let mut builder = self.client.get(&url).query(query);

        // Outbound decoration: an explicit header wins (login), otherwise
        // the session token rides along when we have one
        if let Some(auth) = auth {
            builder = builder.header(api::HEADER_AUTHORIZATION, auth);
        } else if let Some(ref token) = self.token {
            builder = builder.header(api::HEADER_AUTHORIZATION, format!("Bearer {token}"));
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let resp: Response<T> = match serde_json::from_str(&text) {
            Ok(resp) => resp,
            Err(_) => return Err(RequestError::InvalidJson(text)),
        };

        if resp.code != api::STATUS_OK {
            let message = resp.message.unwrap_or_else(|| String::from("unknown error"));
            if status == StatusCode::UNAUTHORIZED || resp.code == api::STATUS_UNAUTHORIZED {
                return Err(RequestError::Unauthorized(message));
            }
            return Err(RequestError::Server {
                code: resp.code,
                message,
            });
        }

        Ok(resp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_validates_url() {
        ApiClient::connect("http://127.0.0.1:9960").unwrap();
        ApiClient::connect("https://portal.magick.example/").unwrap();

        assert!(ApiClient::connect("ftp://127.0.0.1").is_err());
        assert!(ApiClient::connect("not a url").is_err());
        assert!(ApiClient::connect("http://127.0.0.1:9960/api").is_err());
    }
}
