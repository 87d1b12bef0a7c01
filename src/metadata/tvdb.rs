//! TheTVDB catalog: the v4 JSON API plus the legacy XML lookup.
//!
//! v4 reference: <https://thetvdb.github.io/v4-api>. The legacy
//! `GetSeriesByRemoteID.php` endpoint is unauthenticated plain HTTP on a host
//! that may be retired at any time; it is only ever used as a fallback.

use magnetarr_common::ids::string_or_number;
use magnetarr_common::ItemType;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use super::client::MetadataClient;
use crate::error::{Error, Result};
use crate::http::check_status;

// ---------------------------------------------------------------------------
// v4 response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct RemoteIdHit {
    series: Option<NativeRef>,
    movie: Option<NativeRef>,
}

#[derive(Debug, Deserialize)]
struct NativeRef {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtendedRecord {
    #[serde(default)]
    remote_ids: Option<Vec<RemoteId>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteId {
    #[serde(deserialize_with = "string_or_number")]
    id: String,
    source_name: String,
}

/// A title found by searching TVDB for an external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIdMatch {
    pub item_type: ItemType,
    /// TVDB's own id for the series or movie.
    pub tvdb_id: String,
}

/// Path segment TVDB uses for a media type.
fn collection(item_type: ItemType) -> Result<&'static str> {
    match item_type {
        ItemType::Movie => Ok("movies"),
        ItemType::Series => Ok("series"),
        ItemType::Unknown => Err(Error::Unresolved("TVDB needs a movie or series type".into())),
    }
}

/// TheTVDB client.
pub struct TvdbClient {
    api: MetadataClient,
    legacy_url: String,
}

impl TvdbClient {
    pub fn new(base_url: &str, legacy_url: &str, api_key: impl Into<String>) -> Self {
        Self {
            api: MetadataClient::with_login("tvdb", base_url, api_key),
            legacy_url: legacy_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search by IMDB id. `Ok(None)` when TVDB knows no series or movie for it.
    pub async fn search_remote_id(&self, imdb_id: &str) -> Result<Option<RemoteIdMatch>> {
        let body: Envelope<Vec<RemoteIdHit>> = self
            .api
            .get_json(&format!("/search/remoteid/{imdb_id}"))
            .await?;

        let Some(first) = body.data.and_then(|hits| hits.into_iter().next()) else {
            return Ok(None);
        };

        let found = match (first.series, first.movie) {
            (Some(series), _) => Some(RemoteIdMatch {
                item_type: ItemType::Series,
                tvdb_id: series.id,
            }),
            (None, Some(movie)) => Some(RemoteIdMatch {
                item_type: ItemType::Movie,
                tvdb_id: movie.id,
            }),
            (None, None) => {
                debug!(imdb_id, "TVDB remote id hit has neither series nor movie");
                None
            }
        };
        Ok(found)
    }

    /// Resolve a page slug to TVDB's native id.
    pub async fn id_from_slug(&self, item_type: ItemType, slug: &str) -> Result<String> {
        let body: Envelope<NativeRef> = self
            .api
            .get_json(&format!("/{}/slug/{slug}", collection(item_type)?))
            .await?;
        body.data
            .map(|r| r.id)
            .ok_or_else(|| Error::Parse(format!("TVDB slug '{slug}' returned no data")))
    }

    /// Look up the id another catalog (`source_name`, e.g. `"IMDB"`) uses for
    /// a TVDB title, from its extended record.
    pub async fn remote_id(
        &self,
        item_type: ItemType,
        tvdb_id: &str,
        source_name: &str,
    ) -> Result<Option<String>> {
        let body: Envelope<ExtendedRecord> = self
            .api
            .get_json(&format!("/{}/{tvdb_id}/extended", collection(item_type)?))
            .await?;

        Ok(body
            .data
            .and_then(|record| record.remote_ids)
            .unwrap_or_default()
            .into_iter()
            .find(|remote| remote.source_name == source_name)
            .map(|remote| remote.id))
    }

    /// Legacy XML lookup of a series by IMDB id. Unauthenticated.
    pub async fn legacy_series_id(&self, imdb_id: &str) -> Result<Option<String>> {
        let url = format!("{}/GetSeriesByRemoteID.php", self.legacy_url);
        debug!(url = %url, imdb_id, "legacy TVDB lookup");

        let response = self
            .api
            .http()
            .get(&url)
            .query(&[("imdbid", imdb_id)])
            .header(ACCEPT, "application/xml")
            .send()
            .await?;
        let body = check_status(response).await?.text().await?;
        parse_series_id(&body)
    }
}

/// Extract the first `<seriesid>` from a `GetSeriesByRemoteID` document.
fn parse_series_id(xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_series_id = false;
    loop {
        match reader.read_event()? {
            Event::Start(e) => in_series_id = e.name().as_ref() == b"seriesid",
            Event::Text(text) if in_series_id => {
                let id = text.unescape()?.trim().to_string();
                if !id.is_empty() {
                    return Ok(Some(id));
                }
            }
            Event::End(_) => in_series_id = false,
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}
