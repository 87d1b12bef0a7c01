//! Authenticated JSON client for a metadata catalog.
//!
//! The bearer token is acquired lazily on the first authenticated call and
//! cached for the lifetime of the client. Acquisition goes through a
//! [`OnceCell`], so concurrent first callers share a single login request; a
//! failed login leaves the cell empty and the next call tries again. Tokens
//! are never refreshed.

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::{Error, Result};
use crate::http::{check_status, decode_json};

enum TokenSource {
    /// Exchange an API key for a token at `POST /login`.
    Login { api_key: String },
    /// A pre-issued token; nothing to exchange.
    Static,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    data: LoginData,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: String,
}

/// REST client for one catalog API.
pub struct MetadataClient {
    name: &'static str,
    http: reqwest::Client,
    base_url: String,
    source: TokenSource,
    token: OnceCell<String>,
}

impl MetadataClient {
    /// Client that logs in with `api_key` before its first authenticated call.
    pub fn with_login(name: &'static str, base_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            name,
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            source: TokenSource::Login {
                api_key: api_key.into(),
            },
            token: OnceCell::new(),
        }
    }

    /// Client that uses a pre-issued bearer token.
    pub fn with_token(name: &'static str, base_url: &str, token: impl Into<String>) -> Self {
        let token = token.into();
        Self {
            name,
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            source: TokenSource::Static,
            token: if token.is_empty() {
                OnceCell::new()
            } else {
                OnceCell::new_with(Some(token))
            },
        }
    }

    /// The underlying HTTP client, for unauthenticated calls to sibling hosts.
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Current bearer token, logging in first if needed.
    pub async fn token(&self) -> Result<&str> {
        self.token
            .get_or_try_init(|| self.login())
            .await
            .map(String::as_str)
    }

    async fn login(&self) -> Result<String> {
        let api_key = match &self.source {
            TokenSource::Login { api_key } if !api_key.is_empty() => api_key,
            TokenSource::Login { .. } => {
                return Err(Error::Config(format!("no {} API key configured", self.name)))
            }
            TokenSource::Static => {
                return Err(Error::Config(format!("no {} token configured", self.name)))
            }
        };

        let url = self.url("/login");
        debug!(catalog = self.name, url = %url, "logging in");

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&serde_json::json!({ "apikey": api_key }))
            .send()
            .await?;
        let body: LoginResponse = decode_json(check_status(response).await?).await?;
        Ok(body.data.token)
    }

    /// Authenticated `GET` decoded as JSON.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let token = self.token().await?;
        let url = self.url(path);
        debug!(catalog = self.name, url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        decode_json(check_status(response).await?).await
    }
}
