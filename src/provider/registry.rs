//! Ordered provider lookup.

use super::{Imdb, Provider, TheMovieDb, Tvdb};
use crate::metadata::Catalogs;

/// Providers in registration order.
///
/// [`resolve`](Self::resolve) returns the first provider whose pattern matches;
/// registration order is the tie-break when several could match.
///
/// # Examples
///
/// ```rust,ignore
/// use magnetarr::config::MetadataConfig;
/// use magnetarr::metadata::Catalogs;
/// use magnetarr::provider::ProviderRegistry;
///
/// let registry = ProviderRegistry::with_catalogs(&Catalogs::from_config(&MetadataConfig::default()));
/// let provider = registry.resolve("https://www.imdb.com/title/tt0111161/").unwrap();
/// let item = provider.item_from_url("https://www.imdb.com/title/tt0111161/").await;
/// ```
pub struct ProviderRegistry {
    providers: Vec<Provider>,
}

impl ProviderRegistry {
    /// Create an empty registry with no providers.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// The standard set: Imdb, Tvdb, TheMovieDb, in that order.
    pub fn with_catalogs(catalogs: &Catalogs) -> Self {
        let mut registry = Self::new();
        registry.register(Provider::Imdb(Imdb::new(catalogs.tvdb.clone())));
        registry.register(Provider::Tvdb(Tvdb::new(catalogs.tvdb.clone())));
        registry.register(Provider::TheMovieDb(TheMovieDb::new(catalogs.tmdb.clone())));
        registry
    }

    /// Append a provider; it is consulted after every earlier one.
    pub fn register(&mut self, provider: Provider) {
        self.providers.push(provider);
    }

    /// The first provider matching `url`, or `None` for unsupported pages.
    pub fn resolve(&self, url: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.url_match(url))
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
