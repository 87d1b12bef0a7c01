//! Backend settings persistence.
//!
//! The adapters only need `load(name)` and `save(name, blob)`. The TOML store
//! rewrites just the named table with toml_edit so comments and the
//! `[metadata]` section survive a save.

use super::BackendSettings;
use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use toml_edit::DocumentMut;

/// Key-value store for backend settings blobs.
pub trait ConfigStore: Send + Sync {
    /// Load the blob stored under `name`, if any.
    fn load(&self, name: &str) -> Result<Option<BackendSettings>>;

    /// Replace the blob stored under `name`.
    fn save(&self, name: &str, settings: &BackendSettings) -> Result<()>;
}

/// Store backed by a TOML file, one top-level table per backend.
#[derive(Debug, Clone)]
pub struct TomlConfigStore {
    path: PathBuf,
}

impl TomlConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_content(&self) -> Result<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_document(&self) -> Result<DocumentMut> {
        self.read_content()?
            .parse()
            .map_err(|e| Error::Config(format!("Failed to parse {:?}: {e}", self.path)))
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self, name: &str) -> Result<Option<BackendSettings>> {
        let mut table: toml::Table = toml::from_str(&self.read_content()?)
            .map_err(|e| Error::Config(format!("Failed to parse {:?}: {e}", self.path)))?;
        let Some(value) = table.remove(name) else {
            return Ok(None);
        };

        value
            .try_into()
            .map(Some)
            .map_err(|e| Error::Config(format!("Invalid '{name}' settings: {e}")))
    }

    fn save(&self, name: &str, settings: &BackendSettings) -> Result<()> {
        let mut doc = self.read_document()?;

        let wrapper = HashMap::from([(name.to_string(), settings.clone())]);
        let serialized = toml::to_string(&wrapper)
            .map_err(|e| Error::Config(format!("Failed to serialize '{name}': {e}")))?;
        let new_doc: DocumentMut = serialized
            .parse()
            .map_err(|e| Error::Config(format!("Failed to parse serialized '{name}': {e}")))?;

        match new_doc.get(name) {
            Some(item) => doc[name] = item.clone(),
            None => {
                doc.remove(name);
            }
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, doc.to_string())?;
        tracing::debug!("Saved {} settings to {:?}", name, self.path);
        Ok(())
    }
}

/// Volatile store for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    entries: Mutex<HashMap<String, BackendSettings>>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self, name: &str) -> Result<Option<BackendSettings>> {
        Ok(self.entries.lock().get(name).cloned())
    }

    fn save(&self, name: &str, settings: &BackendSettings) -> Result<()> {
        self.entries
            .lock()
            .insert(name.to_string(), settings.clone());
        Ok(())
    }
}
