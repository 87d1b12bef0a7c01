//! themoviedb.org movie and tv pages.
//!
//! URLs look like `https://www.themoviedb.org/movie/693134-dune-part-two` or
//! `https://www.themoviedb.org/tv/1402-the-walking-dead`.

use std::sync::{Arc, LazyLock};

use magnetarr_common::{Item, ItemType, ProviderKind};
use regex::Regex;
use tracing::warn;

use crate::metadata::TmdbClient;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"themoviedb\.org/(movie|tv)/(\d+)").unwrap());

pub struct TheMovieDb {
    tmdb: Arc<TmdbClient>,
}

impl TheMovieDb {
    pub fn new(tmdb: Arc<TmdbClient>) -> Self {
        Self { tmdb }
    }

    pub fn url_match(url: &str) -> bool {
        URL_PATTERN.is_match(url)
    }

    fn type_and_id(url: &str) -> Option<(ItemType, &str)> {
        let captures = URL_PATTERN.captures(url)?;
        let item_type = match captures.get(1)?.as_str() {
            "movie" => ItemType::Movie,
            _ => ItemType::Series,
        };
        Some((item_type, captures.get(2)?.as_str()))
    }

    pub async fn item_from_url(&self, url: &str) -> Item {
        let item = match Self::type_and_id(url) {
            Some((item_type, id)) => self.item_from_id(item_type, id).await,
            None => Item::unresolved(ItemType::Unknown),
        };
        item.with_provider(ProviderKind::TheMovieDb)
    }

    pub async fn item_from_id(&self, item_type: ItemType, tmdb_id: &str) -> Item {
        match self.tmdb.external_ids(item_type, tmdb_id).await {
            Ok(ids) => Item::new(item_type, ids.imdb_id, ids.tvdb_id),
            Err(e) => {
                warn!(tmdb_id, error = %e, "TMDB external id lookup failed");
                Item::unresolved(item_type)
            }
        }
    }
}
