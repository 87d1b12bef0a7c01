//! TMDB (The Movie Database) catalog client.
//!
//! Only the `external_ids` endpoint of the v3 REST API is used: TMDB already
//! cross-references IMDB and TVDB, so a single call yields both ids.
//! Authentication uses a pre-issued v4 read access token as a bearer token.

use magnetarr_common::ids::opt_string_or_number;
use magnetarr_common::ItemType;
use serde::Deserialize;

use super::client::MetadataClient;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// TMDB API response types
// ---------------------------------------------------------------------------

/// Ids other catalogs use for a TMDB title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExternalIds {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub imdb_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub tvdb_id: Option<String>,
}

/// Path segment TMDB uses for a media type.
fn collection(item_type: ItemType) -> Result<&'static str> {
    match item_type {
        ItemType::Movie => Ok("movie"),
        ItemType::Series => Ok("tv"),
        ItemType::Unknown => Err(Error::Unresolved("TMDB needs a movie or tv type".into())),
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// TMDB client.
///
/// # Examples
///
/// ```no_run
/// use magnetarr::metadata::TmdbClient;
///
/// let client = TmdbClient::new("https://api.themoviedb.org/3", "read-access-token");
/// ```
pub struct TmdbClient {
    api: MetadataClient,
}

impl TmdbClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Self {
        Self {
            api: MetadataClient::with_token("tmdb", base_url, token),
        }
    }

    /// Fetch the external ids of a movie or tv show.
    pub async fn external_ids(&self, item_type: ItemType, tmdb_id: &str) -> Result<ExternalIds> {
        self.api
            .get_json(&format!("/{}/{tmdb_id}/external_ids", collection(item_type)?))
            .await
    }
}
