pub mod persist;
mod types;

pub use persist::{ConfigStore, MemoryConfigStore, TomlConfigStore};
pub use types::*;

use anyhow::{Context, Result};
use magnetarr_common::BackendKind;
use std::path::{Path, PathBuf};

const DEFAULT_PATHS: [&str; 3] = [
    "./magnetarr.toml",
    "~/.config/magnetarr/config.toml",
    "/etc/magnetarr/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Find the config file to use: the explicit path, else the first default
/// location that exists.
pub fn locate_config(custom_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = custom_path {
        return Some(path.to_path_buf());
    }

    DEFAULT_PATHS
        .iter()
        .map(|p| PathBuf::from(shellexpand::tilde(p).as_ref()))
        .find(|p| p.exists())
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    match locate_config(custom_path) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    for kind in [BackendKind::Radarr, BackendKind::Sonarr] {
        let backend = config.backend(kind);
        if backend.enabled && backend.configuration.api_key.is_empty() {
            anyhow::bail!("Backend '{}' is enabled but has no API key", kind);
        }
        if let Some(id) = &backend.preferences.quality_profile_id {
            if id.parse::<i64>().is_err() {
                anyhow::bail!(
                    "Backend '{}' has a non-numeric qualityProfileId: {}",
                    kind,
                    id
                );
            }
        }
    }

    if config.metadata.tvdb_api_key.is_empty() {
        tracing::warn!("No TVDB API key configured, imdb and tvdb pages will use fallbacks only");
    }
    if config.metadata.tmdb_token.is_empty() {
        tracing::warn!("No TMDB token configured, themoviedb pages will not resolve");
    }

    Ok(())
}
