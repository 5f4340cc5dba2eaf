//! Persistence seam for the server connection settings.

use std::sync::{Arc, Mutex};

use crate::models::ServerConfig;
use crate::{Error, Result};

/// Key-value persistence for the single [`ServerConfig`] record.
///
/// A store that has never been written loads as `ServerConfig::default()`.
pub trait SettingsStore {
    fn load(&self) -> Result<ServerConfig>;
    fn save(&self, config: &ServerConfig) -> Result<()>;
    fn clear(&self) -> Result<()>;

    fn is_configured(&self) -> Result<bool> {
        Ok(self.load()?.is_configured())
    }
}

/// In-process store, used when embedding the client and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySettingsStore {
    inner: Arc<Mutex<ServerConfig>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(config)),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<ServerConfig> {
        let guard = self
            .inner
            .lock()
            .map_err(|error| Error::Settings(error.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, config: &ServerConfig) -> Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|error| Error::Settings(error.to_string()))?;
        *guard = config.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.save(&ServerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_store_is_not_configured() {
        let store = MemorySettingsStore::new();
        assert!(!store.is_configured().unwrap());
        assert_eq!(store.load().unwrap(), ServerConfig::default());
    }

    #[test]
    fn save_then_clear() {
        let store = MemorySettingsStore::new();
        let config = ServerConfig::new("https://notes.example.com", "tok", Some("inbox".into()));
        store.save(&config).unwrap();
        assert!(store.is_configured().unwrap());
        assert_eq!(store.load().unwrap(), config);

        store.clear().unwrap();
        assert!(!store.is_configured().unwrap());
    }

    #[test]
    fn clones_share_state() {
        let store = MemorySettingsStore::new();
        let other = store.clone();
        store
            .save(&ServerConfig::new("https://n", "t", None))
            .unwrap();
        assert!(other.is_configured().unwrap());
    }
}
