//! Sonarr: series, keyed by TVDB id, with IMDB as the fallback key.

use magnetarr_common::{Item, ItemProperties};
use serde_json::{json, Value};

use super::types::CollectionEntry;
use crate::config::Preferences;

pub(super) const COLLECTION: &str = "/series";
pub(super) const WEB_SECTION: &str = "series";
const DEFAULT_SERIES_TYPE: &str = "standard";

pub(super) fn lookup_term(item: &Item) -> Option<String> {
    match (&item.tvdb_id, &item.imdb_id) {
        (Some(tvdb), _) => Some(format!("tvdb:{tvdb}")),
        (None, Some(imdb)) => Some(format!("imdb:{imdb}")),
        (None, None) => None,
    }
}

/// Series are matched on `tvdbId`; items without a TVDB id fall back to `imdbId`.
pub(super) fn matches(entry: &CollectionEntry, item: &Item) -> bool {
    match (&item.tvdb_id, &item.imdb_id) {
        (Some(_), _) => entry.tvdb_id == item.tvdb_id,
        (None, Some(_)) => entry.imdb_id == item.imdb_id,
        (None, None) => false,
    }
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
        "seriesType".into(),
        json!(preferences.aux_info.as_deref().unwrap_or(DEFAULT_SERIES_TYPE)),
    );
    payload.insert("seasonFolder".into(), json!(true));
    payload.insert(
        "addOptions".into(),
        json!({ "searchForMissingEpisodes": preferences.monitored }),
    );
    Value::Object(payload)
}
