//! Error type shared by the metadata clients, backend adapters and session.
//!
//! Identity resolution swallows [`Error::Transport`], [`Error::HttpStatus`] and
//! [`Error::Parse`] coming from catalog calls and moves on to the next
//! fallback tier; backend operations propagate them unchanged.

use magnetarr_common::ItemType;

/// Unified error type for magnetarr.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote host could not be reached or the connection broke.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote answered with a status code of 400 or above.
    #[error("{status} ({status_text})")]
    HttpStatus {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase, or the response body when there is none.
        status_text: String,
    },

    /// A response body was not the JSON or XML we expected.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No provider recognizes the page.
    #[error("Website not supported: {0}")]
    UnsupportedPage(String),

    /// Resolution finished without a single usable id.
    #[error("Couldn't extract item information: {0}")]
    Unresolved(String),

    /// No backend is registered for the item type.
    #[error("No backend handles {0} items")]
    NoBackend(ItemType),

    /// The backend exists but is switched off in the configuration.
    #[error("Server not enabled, make sure to configure it: {0}")]
    BackendDisabled(String),

    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading or writing the configuration file failed.
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::HttpStatus`].
    pub fn http_status(status: u16, status_text: impl Into<String>) -> Self {
        Error::HttpStatus {
            status,
            status_text: status_text.into(),
        }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            let text = status.canonical_reason().unwrap_or_default();
            Error::http_status(status.as_u16(), text)
        } else if err.is_decode() {
            Error::Parse(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Parse(format!("XML: {err}"))
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
