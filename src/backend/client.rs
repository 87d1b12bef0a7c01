use std::sync::LazyLock;

use regex::Regex;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::http::check_status;
use magnetarr_common::BackendKind;

static SCHEME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://").unwrap());

/// Normalize a configured host and port into a base URL.
///
/// A host without an `http(s)://` scheme gets `http://`; the port is appended
/// unless it is empty.
pub fn build_base_url(host: &str, port: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let host = if SCHEME.is_match(host) {
        host.to_string()
    } else {
        format!("http://{host}")
    };

    if port.is_empty() {
        host
    } else {
        format!("{host}:{port}")
    }
}

/// Authenticated JSON client for one backend instance.
pub(crate) struct BackendClient {
    client: Client,
    base_url: String,
    api_key: String,
    basic_auth: Option<(String, String)>,
}

impl BackendClient {
    pub(crate) fn new(kind: BackendKind, config: &ConnectionConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: build_base_url(&config.host, &config.port_for(kind)),
            api_key: config.api_key.clone(),
            basic_auth: config
                .auth
                .credentials()
                .map(|(user, pass)| (user.to_string(), pass.to_string())),
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3{}", self.base_url, path)
    }

    /// Send a request and decode the JSON reply (`Value::Null` for an empty body).
    ///
    /// A `Value::String` body is sent verbatim; any other body is serialized.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        let url = self.url(path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("X-Api-Key", &self.api_key);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some((user, pass)) = &self.basic_auth {
            request = request.basic_auth(user, Some(pass));
        }
        request = match body {
            Some(Value::String(raw)) => request.body(raw.clone()),
            Some(json) => request.json(json),
            None => request,
        };

        let response = request.send().await?;
        debug!(method = %method, url = %url, status = response.status().as_u16(), "backend request");

        let text = check_status(response).await?.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::Parse(format!("{e} from {path}")))
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let value = self.request(Method::GET, path, None, query).await?;
        serde_json::from_value(value).map_err(|e| Error::Parse(format!("{e} from {path}")))
    }
}
