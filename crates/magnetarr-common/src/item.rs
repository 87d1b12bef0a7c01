//! The canonical identity record passed through resolution and backend sync.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{BackendKind, ItemType, ProviderKind};

/// Catalog metadata attached to an item by a backend lookup.
///
/// The map is kept opaque because it is posted back to the backend verbatim
/// when the item is added; the accessors only read the handful of fields the
/// CLI displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemProperties(Map<String, Value>);

impl ItemProperties {
    /// Wrap a JSON object. Non-object values produce empty properties.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    pub fn year(&self) -> Option<u16> {
        self.0
            .get("year")
            .and_then(Value::as_u64)
            .filter(|y| *y > 0)
            .and_then(|y| u16::try_from(y).ok())
    }

    pub fn overview(&self) -> Option<&str> {
        self.0.get("overview").and_then(Value::as_str)
    }

    pub fn title_slug(&self) -> Option<&str> {
        self.0.get("titleSlug").and_then(Value::as_str)
    }

    /// URL of the first poster image, preferring the remote URL.
    pub fn poster_url(&self) -> Option<&str> {
        self.0
            .get("images")?
            .as_array()?
            .iter()
            .find(|img| img.get("coverType").and_then(Value::as_str) == Some("poster"))
            .and_then(|img| {
                img.get("remoteUrl")
                    .or_else(|| img.get("url"))
                    .and_then(Value::as_str)
            })
    }
}

/// Where an item sits in the resolve → check → act journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// No external id is known yet.
    Unresolved,
    /// At least one external id is known; the backend has not been consulted.
    Resolved,
    /// The backend already manages this title.
    ExistingOpenCandidate,
    /// The backend does not know this title and it can be added.
    CreateCandidate,
}

/// Canonical identity for one media title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_type: ItemType,
    pub imdb_id: Option<String>,
    pub tvdb_id: Option<String>,
    /// Backend-local slug, set once an existence check found the item.
    pub item_slug: Option<String>,
    /// `None` until a backend existence check ran.
    pub exists: Option<bool>,
    #[serde(default, skip_serializing_if = "ItemProperties::is_empty")]
    pub properties: ItemProperties,
    pub provider: Option<ProviderKind>,
    pub server: Option<BackendKind>,
}

impl Item {
    pub fn new(item_type: ItemType, imdb_id: Option<String>, tvdb_id: Option<String>) -> Self {
        Self {
            item_type,
            imdb_id,
            tvdb_id,
            ..Default::default()
        }
    }

    /// An item of known type that resolution failed to identify.
    pub fn unresolved(item_type: ItemType) -> Self {
        Self::new(item_type, None, None)
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// At least one external id is known.
    pub fn is_resolved(&self) -> bool {
        self.imdb_id.is_some() || self.tvdb_id.is_some()
    }

    pub fn state(&self) -> ItemState {
        match (self.is_resolved(), self.exists) {
            (false, _) => ItemState::Unresolved,
            (true, None) => ItemState::Resolved,
            (true, Some(true)) => ItemState::ExistingOpenCandidate,
            (true, Some(false)) => ItemState::CreateCandidate,
        }
    }

    /// Short human-readable label for logs.
    pub fn label(&self) -> String {
        let ids = match (&self.imdb_id, &self.tvdb_id) {
            (Some(imdb), Some(tvdb)) => format!("imdb:{imdb} tvdb:{tvdb}"),
            (Some(imdb), None) => format!("imdb:{imdb}"),
            (None, Some(tvdb)) => format!("tvdb:{tvdb}"),
            (None, None) => "no ids".to_string(),
        };
        match self.properties.title() {
            Some(title) => format!("{title} ({}, {ids})", self.item_type),
            None => format!("{} ({ids})", self.item_type),
        }
    }
}
