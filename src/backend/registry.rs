//! Item type to backend mapping.

use magnetarr_common::{BackendKind, ItemType};

use super::BackendAdapter;
use crate::config::{Config, ConfigStore};
use crate::error::Result;

/// The configured backends, at most one per item type.
#[derive(Default)]
pub struct BackendRegistry {
    adapters: Vec<BackendAdapter>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Radarr and Sonarr from the `[radarr]` and `[sonarr]` tables.
    pub fn from_config(config: &Config) -> Self {
        let mut registry = Self::new();
        for kind in [BackendKind::Radarr, BackendKind::Sonarr] {
            registry.register(BackendAdapter::new(kind, config.backend(kind).clone()));
        }
        registry
    }

    /// Radarr and Sonarr from their blobs in `store`, defaults for missing ones.
    pub fn load(store: &dyn ConfigStore) -> Result<Self> {
        let mut registry = Self::new();
        for kind in [BackendKind::Radarr, BackendKind::Sonarr] {
            registry.register(BackendAdapter::load(kind, store)?);
        }
        Ok(registry)
    }

    /// Add an adapter, replacing any previous one serving the same item type.
    pub fn register(&mut self, adapter: BackendAdapter) {
        self.adapters
            .retain(|existing| existing.item_type() != adapter.item_type());
        self.adapters.push(adapter);
    }

    pub fn get(&self, item_type: ItemType) -> Option<&BackendAdapter> {
        self.adapters.iter().find(|a| a.item_type() == item_type)
    }

    pub fn get_mut(&mut self, item_type: ItemType) -> Option<&mut BackendAdapter> {
        self.adapters.iter_mut().find(|a| a.item_type() == item_type)
    }

    pub fn by_kind(&self, kind: BackendKind) -> Option<&BackendAdapter> {
        self.adapters.iter().find(|a| a.kind() == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackendAdapter> {
        self.adapters.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackendSettings, MemoryConfigStore};

    #[test]
    fn maps_item_types() {
        let registry = BackendRegistry::from_config(&Config::default());
        assert_eq!(registry.get(ItemType::Movie).map(|a| a.kind()), Some(BackendKind::Radarr));
        assert_eq!(registry.get(ItemType::Series).map(|a| a.kind()), Some(BackendKind::Sonarr));
        assert!(registry.get(ItemType::Unknown).is_none());
        assert_eq!(registry.iter().count(), 2);
    }

    #[test]
    fn register_replaces_same_type() {
        let mut registry = BackendRegistry::new();
        registry.register(BackendAdapter::new(BackendKind::Radarr, BackendSettings::default()));
        registry.register(BackendAdapter::new(
            BackendKind::Radarr,
            BackendSettings {
                enabled: true,
                ..Default::default()
            },
        ));
        assert_eq!(registry.iter().count(), 1);
        assert!(registry.by_kind(BackendKind::Radarr).unwrap().is_enabled());
        assert!(registry.by_kind(BackendKind::Sonarr).is_none());
    }

    #[test]
    fn load_from_store() {
        let store = MemoryConfigStore::new();
        store
            .save(
                "sonarr",
                &BackendSettings {
                    enabled: true,
                    ..Default::default()
                },
            )
            .unwrap();

        let mut registry = BackendRegistry::load(&store).unwrap();
        assert!(!registry.get(ItemType::Movie).unwrap().is_enabled());
        assert!(registry.get(ItemType::Series).unwrap().is_enabled());

        let sonarr = registry.get_mut(ItemType::Series).unwrap();
        let mut settings = sonarr.settings().clone();
        settings.enabled = false;
        sonarr.set_settings(settings);
        assert!(!registry.get(ItemType::Series).unwrap().is_enabled());
    }
}
