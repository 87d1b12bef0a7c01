//! Response helpers shared by the catalog clients and the backend adapters.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;

/// Turn a status of 400 or above into [`Error::HttpStatus`].
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.as_u16() < 400 {
        return Ok(response);
    }

    let status_text = match status.canonical_reason() {
        Some(reason) => reason.to_string(),
        None => response.text().await.unwrap_or_default(),
    };
    Err(Error::http_status(status.as_u16(), status_text))
}

/// Read the whole body and decode it as JSON.
///
/// The body is read as text first so a malformed payload surfaces as
/// [`Error::Parse`] instead of a transport error.
pub(crate) async fn decode_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| Error::Parse(format!("{e} in response body")))
}
