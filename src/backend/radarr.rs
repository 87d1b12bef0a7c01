//! Radarr: movies, keyed by IMDB id.

use magnetarr_common::{Item, ItemProperties};
use serde_json::{json, Value};

use super::types::CollectionEntry;
use crate::config::Preferences;

pub(super) const COLLECTION: &str = "/movie";
pub(super) const WEB_SECTION: &str = "movie";
const DEFAULT_MIN_AVAILABILITY: &str = "announced";

pub(super) fn lookup_term(item: &Item) -> Option<String> {
    item.imdb_id.as_ref().map(|id| format!("imdb:{id}"))
}

pub(super) fn matches(entry: &CollectionEntry, item: &Item) -> bool {
    item.imdb_id.is_some() && entry.imdb_id == item.imdb_id
}

pub(super) fn creation_payload(
    properties: &ItemProperties,
    preferences: &Preferences,
    quality_profile_id: i64,
    root_folder: &str,
) -> Value {
    let mut payload = properties.as_map().clone();
    payload.insert("qualityProfileId".into(), json!(quality_profile_id));
    payload.insert("rootFolderPath".into(), json!(root_folder));
    payload.insert("monitored".into(), json!(preferences.monitored));
    payload.insert(
        "minimumAvailability".into(),
        json!(preferences
            .aux_info
            .as_deref()
            .unwrap_or(DEFAULT_MIN_AVAILABILITY)),
    );
    payload.insert(
        "addOptions".into(),
        json!({ "searchForMovie": preferences.monitored }),
    );
    Value::Object(payload)
}
