//! imdb.com title pages.
//!
//! IMDB itself is never queried. The title id in the URL is cross-referenced
//! through TVDB, falling back to the legacy XML API, and finally assumed to be
//! a movie: an IMDB id that no catalog knows as a series is most likely a film.

use std::sync::{Arc, LazyLock};

use magnetarr_common::ids::is_imdb_id;
use magnetarr_common::{Item, ItemType, ProviderKind};
use regex::Regex;
use tracing::{debug, info, warn};

use super::chain::{first_some, soften, Step};
use crate::metadata::TvdbClient;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"//(?:www\.|m\.)?imdb\.com/.+/(tt\d{7,8})/").unwrap());

pub struct Imdb {
    tvdb: Arc<TvdbClient>,
}

impl Imdb {
    pub fn new(tvdb: Arc<TvdbClient>) -> Self {
        Self { tvdb }
    }

    pub fn url_match(url: &str) -> bool {
        URL_PATTERN.is_match(url)
    }

    fn imdb_id_from_url(url: &str) -> Option<&str> {
        URL_PATTERN
            .captures(url)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    pub async fn item_from_url(&self, url: &str) -> Item {
        let item = match Self::imdb_id_from_url(url) {
            Some(imdb_id) => self.item_from_imdb_id(imdb_id).await,
            None => Item::unresolved(ItemType::Unknown),
        };
        item.with_provider(ProviderKind::Imdb)
    }

    /// Resolve an IMDB id. Any well-formed id yields a resolved item.
    pub async fn item_from_imdb_id(&self, imdb_id: &str) -> Item {
        if !is_imdb_id(imdb_id) {
            warn!(imdb_id, "not an IMDB title id");
            return Item::unresolved(ItemType::Unknown);
        }

        let steps: Vec<Step<'_, Item>> = vec![
            Box::pin(self.from_remote_id_search(imdb_id)),
            Box::pin(self.from_legacy_lookup(imdb_id)),
        ];

        match first_some(steps).await {
            Some(item) => item,
            None => {
                info!(imdb_id, "no series match, assuming movie");
                Item::new(ItemType::Movie, Some(imdb_id.to_string()), None)
            }
        }
    }

    async fn from_remote_id_search(&self, imdb_id: &str) -> Option<Item> {
        let found = soften("tvdb remoteid", self.tvdb.search_remote_id(imdb_id).await)?;
        debug!(imdb_id, tvdb_id = %found.tvdb_id, item_type = %found.item_type, "TVDB v4 match");
        Some(Item::new(
            found.item_type,
            Some(imdb_id.to_string()),
            Some(found.tvdb_id),
        ))
    }

    async fn from_legacy_lookup(&self, imdb_id: &str) -> Option<Item> {
        info!(imdb_id, "falling back on legacy TVDB API");
        let series_id = soften("tvdb legacy", self.tvdb.legacy_series_id(imdb_id).await)?;
        Some(Item::new(
            ItemType::Series,
            Some(imdb_id.to_string()),
            Some(series_id),
        ))
    }
}
