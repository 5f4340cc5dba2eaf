//! Persistent settings: address and label in a JSON file, API token in the
//! OS keychain.

#[cfg(test)]
use std::collections::HashMap;
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::{Mutex, OnceLock};

#[cfg(not(test))]
use keyring::Entry;
use serde::{Deserialize, Serialize};
use trilium_sender_core::store::SettingsStore;
use trilium_sender_core::{Error, Result, ServerConfig};

const SETTINGS_FILE_NAME: &str = "settings.json";
const SETTINGS_DIR_NAME: &str = "trilium-sender";
const SETTINGS_PATH_ENV: &str = "TRILIUM_SENDER_SETTINGS";
#[cfg(not(test))]
const KEYRING_SERVICE_NAME: &str = "trilium-sender";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct SettingsFile {
    #[serde(default = "default_settings_version")]
    version: u32,
    #[serde(default)]
    trilium_address: String,
    #[serde(default)]
    trilium_note_label: Option<String>,
}

const fn default_settings_version() -> u32 {
    1
}

pub fn default_settings_path() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
        .ok_or_else(|| Error::Settings("Failed to resolve config directory".to_string()))
}

pub fn resolve_settings_path(cli_settings_path: Option<PathBuf>) -> Result<PathBuf> {
    match cli_settings_path.or_else(|| std::env::var_os(SETTINGS_PATH_ENV).map(PathBuf::from)) {
        Some(path) => Ok(path),
        None => default_settings_path(),
    }
}

#[derive(Debug, Clone)]
pub struct CliSettingsStore {
    path: PathBuf,
    token_account: String,
}

impl CliSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token_account = format!("api_token:{}", path.display());
        Self {
            path,
            token_account,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Result<SettingsFile> {
        if !self.path.exists() {
            return Ok(SettingsFile::default());
        }

        let raw = std::fs::read_to_string(&self.path).map_err(|error| {
            Error::Settings(format!(
                "Failed to read settings at {}: {}",
                self.path.display(),
                error
            ))
        })?;
        serde_json::from_str(&raw).map_err(|error| {
            Error::Settings(format!(
                "Failed to parse settings at {}: {}",
                self.path.display(),
                error
            ))
        })
    }

    fn write_file(&self, file: &SettingsFile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                Error::Settings(format!(
                    "Failed to create settings directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }

        let serialized = serde_json::to_string_pretty(file)?;
        std::fs::write(&self.path, serialized).map_err(|error| {
            Error::Settings(format!(
                "Failed to write settings at {}: {}",
                self.path.display(),
                error
            ))
        })
    }

    #[cfg(test)]
    fn test_vault() -> &'static Mutex<HashMap<String, String>> {
        static VAULT: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        VAULT.get_or_init(|| Mutex::new(HashMap::new()))
    }

    #[cfg(not(test))]
    fn entry(&self) -> Result<Entry> {
        Entry::new(KEYRING_SERVICE_NAME, &self.token_account)
            .map_err(|error| Error::Settings(format!("Secure storage error: {error}")))
    }

    #[cfg(not(test))]
    fn load_token(&self) -> Result<String> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(token),
            Err(keyring::Error::NoEntry) => Ok(String::new()),
            Err(error) => Err(Error::Settings(format!("Secure storage error: {error}"))),
        }
    }

    #[cfg(test)]
    fn load_token(&self) -> Result<String> {
        let guard = Self::test_vault()
            .lock()
            .map_err(|error| Error::Settings(error.to_string()))?;
        Ok(guard.get(&self.token_account).cloned().unwrap_or_default())
    }

    #[cfg(not(test))]
    fn save_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return self.clear_token();
        }
        self.entry()?
            .set_password(token)
            .map_err(|error| Error::Settings(format!("Secure storage error: {error}")))
    }

    #[cfg(test)]
    fn save_token(&self, token: &str) -> Result<()> {
        let mut guard = Self::test_vault()
            .lock()
            .map_err(|error| Error::Settings(error.to_string()))?;
        guard.insert(self.token_account.clone(), token.to_string());
        Ok(())
    }

    #[cfg(not(test))]
    fn clear_token(&self) -> Result<()> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(Error::Settings(format!("Secure storage error: {error}"))),
        }
    }

    #[cfg(test)]
    fn clear_token(&self) -> Result<()> {
        let mut guard = Self::test_vault()
            .lock()
            .map_err(|error| Error::Settings(error.to_string()))?;
        guard.remove(&self.token_account);
        Ok(())
    }
}

impl SettingsStore for CliSettingsStore {
    fn load(&self) -> Result<ServerConfig> {
        let file = self.read_file()?;
        let api_token = if file.trilium_address.is_empty() {
            String::new()
        } else {
            self.load_token()?
        };
        Ok(ServerConfig::new(
            file.trilium_address,
            api_token,
            file.trilium_note_label,
        ))
    }

    /// The keychain entry is rolled back when the settings file cannot be
    /// written, so a token never outlives its address.
    fn save(&self, config: &ServerConfig) -> Result<()> {
        let previous_token = self.load_token()?;
        self.save_token(&config.api_token)?;

        let written = self.write_file(&SettingsFile {
            version: default_settings_version(),
            trilium_address: config.address.clone(),
            trilium_note_label: config.note_label.clone().filter(|label| !label.is_empty()),
        });
        if let Err(error) = written {
            let restored = if previous_token.is_empty() {
                self.clear_token()
            } else {
                self.save_token(&previous_token)
            };
            if let Err(restore_error) = restored {
                tracing::warn!("Failed to roll back stored API token: {}", restore_error);
            }
            return Err(error);
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.clear_token()?;
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn temp_store() -> (tempfile::TempDir, CliSettingsStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CliSettingsStore::new(dir.path().join("nested").join(SETTINGS_FILE_NAME));
        (dir, store)
    }

    #[test]
    fn missing_file_loads_unconfigured() {
        let (_dir, store) = temp_store();
        let config = store.load().unwrap();
        assert_eq!(config, ServerConfig::default());
        assert!(!store.is_configured().unwrap());
    }

    #[test]
    fn save_roundtrip_keeps_token_out_of_file() {
        let (_dir, store) = temp_store();
        let config = ServerConfig::new(
            "https://notes.example.com",
            "secret-token",
            Some("inbox".to_string()),
        );

        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
        assert!(store.is_configured().unwrap());

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("https://notes.example.com"));
        assert!(!raw.contains("secret-token"));
    }

    #[test]
    fn empty_label_is_not_written() {
        let (_dir, store) = temp_store();
        store
            .save(&ServerConfig::new("https://n", "t", Some(String::new())))
            .unwrap();
        assert_eq!(store.load().unwrap().note_label, None);
    }

    #[test]
    fn clear_forgets_everything() {
        let (_dir, store) = temp_store();
        store
            .save(&ServerConfig::new("https://n", "t", None))
            .unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), ServerConfig::default());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn failed_file_write_leaves_no_token_behind() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let store = CliSettingsStore::new(blocker.join(SETTINGS_FILE_NAME));

        let error = store
            .save(&ServerConfig::new("https://n", "orphan", None))
            .unwrap_err();

        assert!(matches!(error, Error::Settings(_)));
        assert_eq!(store.load_token().unwrap(), "");
    }

    #[test]
    fn failed_file_write_restores_previous_token() {
        let (_dir, store) = temp_store();
        store
            .save(&ServerConfig::new("https://old", "old-token", None))
            .unwrap();
        std::fs::remove_file(store.path()).unwrap();
        std::fs::create_dir(store.path()).unwrap();

        assert!(store
            .save(&ServerConfig::new("https://new", "new-token", None))
            .is_err());
        assert_eq!(store.load_token().unwrap(), "old-token");
    }

    #[test]
    fn corrupt_file_is_a_settings_error() {
        let (_dir, store) = temp_store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load().unwrap_err(), Error::Settings(_)));
    }

    #[test]
    fn resolve_settings_path_prefers_explicit_path() {
        let explicit = PathBuf::from("/tmp/explicit-settings.json");
        assert_eq!(
            resolve_settings_path(Some(explicit.clone())).unwrap(),
            explicit
        );
    }
}
