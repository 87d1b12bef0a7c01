use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::client::{build_base_url, BackendClient};
use super::types::{CollectionEntry, QualityProfile, RootFolder, SystemStatus};
use super::{radarr, sonarr};
use crate::config::{BackendSettings, ConfigStore, Preferences};
use crate::error::{Error, Result};
use magnetarr_common::{BackendKind, Item, ItemProperties, ItemType};

/// One configured Radarr or Sonarr instance.
///
/// The shared operations live here; per-backend differences (collection path,
/// lookup term, native id match, creation payload) dispatch on [`BackendKind`].
pub struct BackendAdapter {
    kind: BackendKind,
    settings: BackendSettings,
    client: BackendClient,
}

impl BackendAdapter {
    pub fn new(kind: BackendKind, settings: BackendSettings) -> Self {
        let client = BackendClient::new(kind, &settings.configuration);
        Self {
            kind,
            settings,
            client,
        }
    }

    /// Build an adapter from the blob stored under the backend's name,
    /// falling back to defaults when the store has none.
    pub fn load(kind: BackendKind, store: &dyn ConfigStore) -> Result<Self> {
        let settings = store.load(kind.name())?.unwrap_or_default();
        Ok(Self::new(kind, settings))
    }

    pub fn save_config(&self, store: &dyn ConfigStore) -> Result<()> {
        store.save(self.kind.name(), &self.settings)
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn item_type(&self) -> ItemType {
        self.kind.item_type()
    }

    pub fn settings(&self) -> &BackendSettings {
        &self.settings
    }

    /// Replace the settings and reconnect with the new connection details.
    pub fn set_settings(&mut self, settings: BackendSettings) {
        self.client = BackendClient::new(self.kind, &settings.configuration);
        self.settings = settings;
    }

    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    pub fn build_base_url(&self) -> String {
        let connection = &self.settings.configuration;
        build_base_url(&connection.host, &connection.port_for(self.kind))
    }

    /// Authenticated call under `/api/v3`. Errors are never retried.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        query: &[(&str, &str)],
    ) -> Result<Value> {
        self.client.request(method, path, body, query).await
    }

    pub async fn list_profiles(&self) -> Result<Vec<QualityProfile>> {
        self.client.get("/qualityProfile", &[]).await
    }

    pub async fn list_folders(&self) -> Result<Vec<RootFolder>> {
        self.client.get("/rootfolder", &[]).await
    }

    /// Backend version reported by `/system/status`.
    pub async fn test_connection(&self) -> Result<String> {
        let status: SystemStatus = self.client.get("/system/status", &[]).await?;
        info!(
            backend = %self.kind,
            version = %status.version,
            "connected to {}",
            status.app_name.as_deref().unwrap_or(self.kind.name())
        );
        Ok(status.version)
    }

    /// Slug of the matching entry in the backend's collection, if any.
    ///
    /// The backend offers no lookup by external id, so this fetches the whole
    /// collection and scans it.
    pub async fn item_exists(&self, item: &Item) -> Result<Option<String>> {
        let entries: Vec<CollectionEntry> = self.client.get(self.collection(), &[]).await?;
        debug!(backend = %self.kind, entries = entries.len(), "scanning collection");

        Ok(entries
            .into_iter()
            .find(|entry| self.matches(entry, item) || slug_matches(entry, item))
            .and_then(|entry| entry.title_slug))
    }

    /// Search candidates for `item`, in backend order.
    pub async fn lookup_item(&self, item: &Item) -> Result<Vec<Value>> {
        let term = self
            .lookup_term(item)
            .ok_or_else(|| Error::Unresolved(format!("no id to look up {}", item.label())))?;
        let path = format!("{}/lookup", self.collection());
        self.client.get(&path, &[("term", term.as_str())]).await
    }

    /// Check existence and fetch backend details for `item` concurrently.
    ///
    /// The item is only updated when both calls succeed. Only the first lookup
    /// candidate is kept.
    pub async fn get_item_info(&self, item: &mut Item) -> Result<()> {
        let probe: &Item = item;
        let (slug, candidates) =
            tokio::try_join!(self.item_exists(probe), self.lookup_item(probe))?;

        if candidates.len() > 1 {
            warn!(
                backend = %self.kind,
                candidates = candidates.len(),
                "ambiguous lookup for {}, keeping the first candidate",
                probe.label()
            );
        }

        item.exists = Some(slug.is_some());
        item.item_slug = slug;
        item.properties = candidates
            .into_iter()
            .next()
            .map(ItemProperties::from_value)
            .unwrap_or_default();
        item.server = Some(self.kind);
        Ok(())
    }

    /// Create `item` on the backend and mark it as existing.
    ///
    /// Returns the backend's representation of the new entry.
    pub async fn add_item(&self, item: &mut Item) -> Result<Value> {
        if item.properties.is_empty() {
            return Err(Error::Unresolved(format!(
                "no backend details for {}, run a lookup first",
                item.label()
            )));
        }

        let preferences = &self.settings.preferences;
        let quality_profile_id = self.quality_profile_id(preferences).await?;
        let root_folder = self.root_folder(preferences).await?;
        let payload = match self.kind {
            BackendKind::Radarr => radarr::creation_payload(
                &item.properties,
                preferences,
                quality_profile_id,
                &root_folder,
            ),
            BackendKind::Sonarr => sonarr::creation_payload(
                &item.properties,
                preferences,
                quality_profile_id,
                &root_folder,
            ),
        };

        let created = self
            .client
            .request(Method::POST, self.collection(), Some(&payload), &[])
            .await?;

        item.exists = Some(true);
        item.item_slug = created
            .get("titleSlug")
            .and_then(Value::as_str)
            .or_else(|| item.properties.title_slug())
            .map(str::to_string);
        item.server = Some(self.kind);
        info!(backend = %self.kind, "added {}", item.label());
        Ok(created)
    }

    /// Link to the item's page in the backend web UI.
    pub fn item_web_url(&self, slug: &str) -> String {
        let section = match self.kind {
            BackendKind::Radarr => radarr::WEB_SECTION,
            BackendKind::Sonarr => sonarr::WEB_SECTION,
        };
        format!("{}/{section}/{slug}", self.client.base_url())
    }

    fn collection(&self) -> &'static str {
        match self.kind {
            BackendKind::Radarr => radarr::COLLECTION,
            BackendKind::Sonarr => sonarr::COLLECTION,
        }
    }

    fn lookup_term(&self, item: &Item) -> Option<String> {
        match self.kind {
            BackendKind::Radarr => radarr::lookup_term(item),
            BackendKind::Sonarr => sonarr::lookup_term(item),
        }
    }

    fn matches(&self, entry: &CollectionEntry, item: &Item) -> bool {
        match self.kind {
            BackendKind::Radarr => radarr::matches(entry, item),
            BackendKind::Sonarr => sonarr::matches(entry, item),
        }
    }

    async fn quality_profile_id(&self, preferences: &Preferences) -> Result<i64> {
        if let Some(raw) = preferences.quality_profile_id.as_deref() {
            return raw.trim().parse().map_err(|_| {
                Error::Config(format!(
                    "{}: qualityProfileId must be an integer, got '{raw}'",
                    self.kind
                ))
            });
        }

        let profiles = self.list_profiles().await?;
        let first = profiles.first().ok_or_else(|| {
            Error::Config(format!("{} has no quality profiles", self.kind))
        })?;
        debug!(backend = %self.kind, profile = %first.name, "no qualityProfileId set, using first profile");
        Ok(first.id)
    }

    async fn root_folder(&self, preferences: &Preferences) -> Result<String> {
        if let Some(folder) = preferences.folder.as_deref().filter(|f| !f.is_empty()) {
            return Ok(folder.to_string());
        }

        let folders = self.list_folders().await?;
        let first = folders
            .into_iter()
            .next()
            .ok_or_else(|| Error::Config(format!("{} has no root folders", self.kind)))?;
        debug!(backend = %self.kind, folder = %first.path, "no folder set, using first root folder");
        Ok(first.path)
    }
}

fn slug_matches(entry: &CollectionEntry, item: &Item) -> bool {
    matches!((&entry.title_slug, &item.item_slug), (Some(a), Some(b)) if a == b)
}
