//! Type tags shared by the resolution and backend layers.
//!
//! All enums serialize in lowercase so they can be printed or stored next to
//! the backend configuration without a translation table.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of media title an [`Item`](crate::Item) identifies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    /// Resolution has not classified the title yet.
    #[default]
    Unknown,
    /// A single movie.
    Movie,
    /// A TV series (show).
    Series,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Movie => write!(f, "movie"),
            Self::Series => write!(f, "series"),
        }
    }
}

/// Tag naming the provider that produced an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// imdb.com title pages.
    Imdb,
    /// thetvdb.com movie and series pages.
    Tvdb,
    /// themoviedb.org movie and tv pages.
    TheMovieDb,
}

impl ProviderKind {
    /// Display name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Imdb => "Imdb",
            Self::Tvdb => "Tvdb",
            Self::TheMovieDb => "TheMovieDb",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tag naming the download-management backend that enriched an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Movie backend.
    Radarr,
    /// Series backend.
    Sonarr,
}

impl BackendKind {
    /// Configuration key and display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Radarr => "radarr",
            Self::Sonarr => "sonarr",
        }
    }

    /// The item type this backend manages.
    pub fn item_type(&self) -> ItemType {
        match self {
            Self::Radarr => ItemType::Movie,
            Self::Sonarr => ItemType::Series,
        }
    }

    /// Port the backend listens on out of the box.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Radarr => 7878,
            Self::Sonarr => 8989,
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "radarr" => Ok(Self::Radarr),
            "sonarr" => Ok(Self::Sonarr),
            other => Err(format!("unknown backend: {other}")),
        }
    }
}
