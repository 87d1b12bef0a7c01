use magnetarr_common::ids::opt_string_or_number;
use magnetarr_common::BackendKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub radarr: BackendSettings,

    #[serde(default)]
    pub sonarr: BackendSettings,
}

impl Config {
    pub fn backend(&self, kind: BackendKind) -> &BackendSettings {
        match kind {
            BackendKind::Radarr => &self.radarr,
            BackendKind::Sonarr => &self.sonarr,
        }
    }
}

/// Endpoints and credentials for the metadata catalogs.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataConfig {
    #[serde(default = "default_tvdb_url")]
    pub tvdb_url: String,

    /// Legacy XML API. Plain HTTP on a host that may disappear; only used as
    /// the second resolution tier.
    #[serde(default = "default_tvdb_legacy_url")]
    pub tvdb_legacy_url: String,

    /// Project API key exchanged for a bearer token at `/login`
    #[serde(default)]
    pub tvdb_api_key: String,

    #[serde(default = "default_tmdb_url")]
    pub tmdb_url: String,

    /// Pre-issued TMDB read access token (no login endpoint)
    #[serde(default)]
    pub tmdb_token: String,
}

fn default_tvdb_url() -> String {
    "https://api4.thetvdb.com/v4".to_string()
}
fn default_tvdb_legacy_url() -> String {
    "http://thetvdb.com/api".to_string()
}
fn default_tmdb_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            tvdb_url: default_tvdb_url(),
            tvdb_legacy_url: default_tvdb_legacy_url(),
            tvdb_api_key: String::new(),
            tmdb_url: default_tmdb_url(),
            tmdb_token: String::new(),
        }
    }
}

/// Persisted blob for one backend, keyed by backend name in the store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub configuration: ConnectionConfig,

    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ConnectionConfig {
    #[serde(default = "default_backend_host")]
    pub host: String,

    /// `None` means the backend's default port, an empty string means no port
    #[serde(default, deserialize_with = "opt_port")]
    pub port: Option<String>,

    #[serde(default, rename = "apikey")]
    pub api_key: String,

    #[serde(default)]
    pub auth: BasicAuth,
}

fn default_backend_host() -> String {
    "http://127.0.0.1".to_string()
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_backend_host(),
            port: None,
            api_key: String::new(),
            auth: BasicAuth::default(),
        }
    }
}

impl ConnectionConfig {
    /// Port to use for `kind`; empty when explicitly disabled.
    pub fn port_for(&self, kind: BackendKind) -> String {
        self.port
            .clone()
            .unwrap_or_else(|| kind.default_port().to_string())
    }
}

/// Ports arrive as numbers from TOML and as strings from form input; an
/// explicit empty string must survive as "no port".
fn opt_port<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPort {
        Text(String),
        Int(u32),
    }

    Ok(Option::<RawPort>::deserialize(deserializer)?.map(|raw| match raw {
        RawPort::Text(s) => s.trim().to_string(),
        RawPort::Int(n) => n.to_string(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BasicAuth {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub pass: String,
}

impl BasicAuth {
    /// Basic auth is sent only when both halves are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        if self.user.is_empty() || self.pass.is_empty() {
            None
        } else {
            Some((&self.user, &self.pass))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default = "default_monitored")]
    pub monitored: bool,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub quality_profile_id: Option<String>,

    /// Minimum availability (Radarr) or series type (Sonarr)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_info: Option<String>,

    /// Root folder path new items are created under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
}

fn default_monitored() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            monitored: default_monitored(),
            quality_profile_id: None,
            aux_info: None,
            folder: None,
        }
    }
}
