//! Shared helpers for integration tests.
//!
//! Every catalog and backend is served by one [`MockServer`]: TVDB v4 at the
//! root, the legacy TVDB API under `/legacy`, TMDB under `/tmdb`, and the
//! backends at `/api/v3`.

#![allow(dead_code)]

use std::sync::Arc;

use magnetarr::backend::{BackendAdapter, BackendRegistry};
use magnetarr::config::{BackendSettings, ConnectionConfig, Preferences};
use magnetarr::metadata::{Catalogs, TmdbClient, TvdbClient};
use magnetarr::provider::ProviderRegistry;
use magnetarr::session::Session;
use magnetarr_common::BackendKind;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TVDB_TOKEN: &str = "tvdb-session-token";
pub const TMDB_TOKEN: &str = "tmdb-read-token";
pub const API_KEY: &str = "0123456789abcdef";

pub fn catalogs(server: &MockServer) -> Catalogs {
    let uri = server.uri();
    Catalogs {
        tvdb: Arc::new(TvdbClient::new(&uri, &format!("{uri}/legacy"), "tvdb-key")),
        tmdb: Arc::new(TmdbClient::new(&format!("{uri}/tmdb"), TMDB_TOKEN)),
    }
}

pub fn providers(server: &MockServer) -> ProviderRegistry {
    ProviderRegistry::with_catalogs(&catalogs(server))
}

/// Enabled backend settings pointing at the mock server, with no port.
pub fn settings(server: &MockServer, preferences: Preferences) -> BackendSettings {
    BackendSettings {
        enabled: true,
        configuration: ConnectionConfig {
            host: server.uri(),
            port: Some(String::new()),
            api_key: API_KEY.to_string(),
            ..Default::default()
        },
        preferences,
    }
}

pub fn adapter(server: &MockServer, kind: BackendKind) -> BackendAdapter {
    BackendAdapter::new(kind, settings(server, Preferences::default()))
}

pub fn session(server: &MockServer, preferences: Preferences) -> Session {
    let mut backends = BackendRegistry::new();
    for kind in [BackendKind::Radarr, BackendKind::Sonarr] {
        backends.register(BackendAdapter::new(kind, settings(server, preferences.clone())));
    }
    Session::new(providers(server), backends)
}

/// Accept any TVDB login.
pub async fn mount_tvdb_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "token": TVDB_TOKEN }
            })),
        )
        .mount(server)
        .await;
}

pub fn legacy_series_xml(series_id: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" ?>
<Data>
  <Series>
    <seriesid>{series_id}</seriesid>
    <language>en</language>
    <SeriesName>Oz</SeriesName>
    <IMDB_ID>tt0118421</IMDB_ID>
  </Series>
</Data>"#
    )
}
