//! thetvdb.com movie and series pages, resolved through their slug.

use std::sync::{Arc, LazyLock};

use magnetarr_common::{Item, ItemType, ProviderKind};
use regex::Regex;
use tracing::warn;

use crate::metadata::TvdbClient;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"thetvdb\.com/(movies|series)/([^/?#]+)").unwrap());

pub struct Tvdb {
    tvdb: Arc<TvdbClient>,
}

impl Tvdb {
    pub fn new(tvdb: Arc<TvdbClient>) -> Self {
        Self { tvdb }
    }

    pub fn url_match(url: &str) -> bool {
        URL_PATTERN.is_match(url)
    }

    fn type_and_slug(url: &str) -> Option<(ItemType, &str)> {
        let captures = URL_PATTERN.captures(url)?;
        let item_type = match captures.get(1)?.as_str() {
            "movies" => ItemType::Movie,
            _ => ItemType::Series,
        };
        Some((item_type, captures.get(2)?.as_str()))
    }

    pub async fn item_from_url(&self, url: &str) -> Item {
        let item = match Self::type_and_slug(url) {
            Some((item_type, slug)) => self.item_from_slug(item_type, slug).await,
            None => Item::unresolved(ItemType::Unknown),
        };
        item.with_provider(ProviderKind::Tvdb)
    }

    /// Resolve a TVDB slug. A missing IMDB cross-reference still yields a
    /// usable item carrying only the TVDB id.
    pub async fn item_from_slug(&self, item_type: ItemType, slug: &str) -> Item {
        let tvdb_id = match self.tvdb.id_from_slug(item_type, slug).await {
            Ok(id) => id,
            Err(e) => {
                warn!(slug, error = %e, "TVDB slug lookup failed");
                return Item::unresolved(item_type);
            }
        };

        let imdb_id = match self.tvdb.remote_id(item_type, &tvdb_id, "IMDB").await {
            Ok(id) => id,
            Err(e) => {
                warn!(tvdb_id = %tvdb_id, error = %e, "TVDB extended record unavailable");
                None
            }
        };

        Item::new(item_type, imdb_id, Some(tvdb_id))
    }
}
