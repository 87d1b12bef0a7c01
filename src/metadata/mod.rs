//! Clients for the metadata catalogs used during identity resolution.
//!
//! # Module layout
//!
//! - [`client`] -- Authenticated JSON client with lazy, single-flight login.
//! - [`tvdb`] -- TheTVDB v4 API and the legacy XML lookup.
//! - [`tmdb`] -- TMDB external-id lookups.

pub mod client;
pub mod tmdb;
pub mod tvdb;

use std::sync::Arc;

use crate::config::MetadataConfig;

pub use client::MetadataClient;
pub use tmdb::{ExternalIds, TmdbClient};
pub use tvdb::{RemoteIdMatch, TvdbClient};

/// The catalog clients, built once and shared by every provider.
#[derive(Clone)]
pub struct Catalogs {
    pub tvdb: Arc<TvdbClient>,
    pub tmdb: Arc<TmdbClient>,
}

impl Catalogs {
    pub fn from_config(config: &MetadataConfig) -> Self {
        Self {
            tvdb: Arc::new(TvdbClient::new(
                &config.tvdb_url,
                &config.tvdb_legacy_url,
                config.tvdb_api_key.clone(),
            )),
            tmdb: Arc::new(TmdbClient::new(&config.tmdb_url, config.tmdb_token.clone())),
        }
    }
}
