//! Providers turn a page URL on a catalog website into a canonical [`Item`].
//!
//! # Module layout
//!
//! - [`imdb`], [`tvdb`], [`themoviedb`] -- One provider per supported website.
//! - [`chain`] -- The "first result wins" combinator behind fallback chains.
//! - [`registry`] -- Ordered, first-match-wins provider lookup.

pub mod chain;
pub mod imdb;
pub mod registry;
pub mod themoviedb;
pub mod tvdb;

use magnetarr_common::{Item, ProviderKind};

pub use imdb::Imdb;
pub use registry::ProviderRegistry;
pub use themoviedb::TheMovieDb;
pub use tvdb::Tvdb;

/// A supported website.
pub enum Provider {
    Imdb(Imdb),
    Tvdb(Tvdb),
    TheMovieDb(TheMovieDb),
}

impl Provider {
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Imdb(_) => ProviderKind::Imdb,
            Provider::Tvdb(_) => ProviderKind::Tvdb,
            Provider::TheMovieDb(_) => ProviderKind::TheMovieDb,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this provider understands `url`.
    pub fn url_match(&self, url: &str) -> bool {
        match self {
            Provider::Imdb(_) => Imdb::url_match(url),
            Provider::Tvdb(_) => Tvdb::url_match(url),
            Provider::TheMovieDb(_) => TheMovieDb::url_match(url),
        }
    }

    /// Resolve `url` to an item tagged with this provider.
    ///
    /// Catalog failures never surface as errors; check
    /// [`Item::is_resolved`] before handing the item to a backend.
    pub async fn item_from_url(&self, url: &str) -> Item {
        match self {
            Provider::Imdb(p) => p.item_from_url(url).await,
            Provider::Tvdb(p) => p.item_from_url(url).await,
            Provider::TheMovieDb(p) => p.item_from_url(url).await,
        }
    }
}
