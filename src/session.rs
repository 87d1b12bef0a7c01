//! Resolve a page, then open or add it in its backend.
//!
//! A [`Session`] owns both registries and is built once per process; callers
//! pass it around explicitly.

use serde::Serialize;
use tracing::{info, warn};

use crate::backend::{BackendAdapter, BackendRegistry};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::metadata::Catalogs;
use crate::provider::ProviderRegistry;
use magnetarr_common::{Item, ItemState};

/// Terminal state of [`Session::sync`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum Outcome {
    /// The backend already has the item; `url` is its page in the backend UI.
    Opened { url: String },
    /// The item was added to the backend.
    Created { item: Item },
    /// Any failure after the page was recognized, with the error text.
    Failed { message: String },
}

pub struct Session {
    providers: ProviderRegistry,
    backends: BackendRegistry,
}

impl Session {
    pub fn new(providers: ProviderRegistry, backends: BackendRegistry) -> Self {
        Self {
            providers,
            backends,
        }
    }

    /// Standard providers and both backends, all configured from `config`.
    pub fn from_config(config: &Config) -> Self {
        let catalogs = Catalogs::from_config(&config.metadata);
        Self::new(
            ProviderRegistry::with_catalogs(&catalogs),
            BackendRegistry::from_config(config),
        )
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    pub fn backends(&self) -> &BackendRegistry {
        &self.backends
    }

    pub fn backends_mut(&mut self) -> &mut BackendRegistry {
        &mut self.backends
    }

    /// Turn a page URL into an item with at least one external id.
    pub async fn resolve(&self, url: &str) -> Result<Item> {
        let provider = self
            .providers
            .resolve(url)
            .ok_or_else(|| Error::UnsupportedPage(url.to_string()))?;

        let item = provider.item_from_url(url).await;
        if !item.is_resolved() {
            return Err(Error::Unresolved(format!(
                "{} found no ids for {url}",
                provider.name()
            )));
        }

        info!(provider = provider.name(), "resolved {}", item.label());
        Ok(item)
    }

    /// The enabled backend responsible for `item`.
    pub fn backend_for(&self, item: &Item) -> Result<&BackendAdapter> {
        let backend = self
            .backends
            .get(item.item_type)
            .ok_or(Error::NoBackend(item.item_type))?;
        if !backend.is_enabled() {
            return Err(Error::BackendDisabled(backend.kind().to_string()));
        }
        Ok(backend)
    }

    /// Resolve `url` and ask the backend whether it already has the item.
    pub async fn inspect(&self, url: &str) -> Result<Item> {
        let mut item = self.resolve(url).await?;
        self.backend_for(&item)?.get_item_info(&mut item).await?;
        Ok(item)
    }

    /// Open the item if the backend has it, otherwise add it.
    pub async fn sync(&self, url: &str) -> Outcome {
        match self.try_sync(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("sync failed for {url}: {e}");
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn try_sync(&self, url: &str) -> Result<Outcome> {
        let mut item = self.inspect(url).await?;
        let backend = self.backend_for(&item)?;

        match (item.state(), item.item_slug.as_deref()) {
            (ItemState::ExistingOpenCandidate, Some(slug)) => Ok(Outcome::Opened {
                url: backend.item_web_url(slug),
            }),
            _ => {
                backend.add_item(&mut item).await?;
                Ok(Outcome::Created { item })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendSettings;
    use magnetarr_common::ItemType;

    fn session(config: &Config) -> Session {
        Session::from_config(config)
    }

    #[tokio::test]
    async fn unsupported_page() {
        let err = session(&Config::default())
            .resolve("https://example.com/movie/1")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedPage(url) if url == "https://example.com/movie/1"));
    }

    #[tokio::test]
    async fn unsupported_page_fails_sync() {
        let outcome = session(&Config::default()).sync("https://example.com/").await;
        assert_eq!(
            outcome,
            Outcome::Failed {
                message: "Website not supported: https://example.com/".into()
            }
        );
    }

    #[test]
    fn disabled_backend_is_rejected() {
        let session = session(&Config::default());
        let item = Item::new(ItemType::Movie, Some("tt0111161".into()), None);
        let err = session.backend_for(&item).err().unwrap();
        assert!(matches!(err, Error::BackendDisabled(name) if name == "radarr"));
    }

    #[test]
    fn unknown_type_has_no_backend() {
        let session = session(&Config::default());
        let err = session.backend_for(&Item::default()).err().unwrap();
        assert!(matches!(err, Error::NoBackend(ItemType::Unknown)));
    }

    #[test]
    fn enabled_backend_is_returned() {
        let config = Config {
            sonarr: BackendSettings {
                enabled: true,
                ..Default::default()
            },
            ..Default::default()
        };
        let session = session(&config);
        let item = Item::new(ItemType::Series, None, Some("79488".into()));
        assert_eq!(
            session.backend_for(&item).map(|b| b.kind()).ok(),
            Some(magnetarr_common::BackendKind::Sonarr)
        );
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(Outcome::Opened {
            url: "http://127.0.0.1:7878/movie/x".into(),
        })
        .unwrap();
        assert_eq!(json["outcome"], "opened");
        assert_eq!(json["url"], "http://127.0.0.1:7878/movie/x");
    }
}
