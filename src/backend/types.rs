use magnetarr_common::ids::opt_string_or_number;
use serde::{Deserialize, Serialize};

/// Quality profile offered by a backend for new items.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
}

/// Library root folder on the backend host.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RootFolder {
    #[serde(default)]
    pub id: Option<i64>,
    pub path: String,
    #[serde(default)]
    pub free_space: Option<u64>,
}

/// The fields of a collection entry used by the existence check.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionEntry {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub tvdb_id: Option<String>,
    #[serde(default)]
    pub title_slug: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    #[serde(default)]
    pub app_name: Option<String>,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sonarr_entry_numeric_tvdb_id() {
        let entry: CollectionEntry = serde_json::from_str(
            r#"{"title": "Oz", "tvdbId": 79488, "imdbId": "tt0118421", "titleSlug": "oz", "id": 3}"#,
        )
        .unwrap();
        assert_eq!(entry.tvdb_id.as_deref(), Some("79488"));
        assert_eq!(entry.imdb_id.as_deref(), Some("tt0118421"));
        assert_eq!(entry.title_slug.as_deref(), Some("oz"));
    }

    #[test]
    fn radarr_entry_without_tvdb() {
        let entry: CollectionEntry =
            serde_json::from_str(r#"{"imdbId": "tt123", "titleSlug": "movie-title", "tmdbId": 5}"#)
                .unwrap();
        assert_eq!(entry.imdb_id.as_deref(), Some("tt123"));
        assert!(entry.tvdb_id.is_none());
    }

    #[test]
    fn root_folder_shape() {
        let folder: RootFolder =
            serde_json::from_str(r#"{"id": 1, "path": "/movies", "freeSpace": 1024, "accessible": true}"#)
                .unwrap();
        assert_eq!(folder.path, "/movies");
        assert_eq!(folder.free_space, Some(1024));
    }
}
