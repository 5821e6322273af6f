use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::error::ConfigError;

/// Application directory name under the platform config/cache dirs.
pub const APP_DIR_NAME: &str = "PhotoImporter";

/// Read-only view of the persisted key-value settings.
pub trait SettingsStore: Send + Sync {
    /// Returns the raw JSON text stored under `key`.
    fn get(&self, key: &str) -> Result<String, ConfigError>;
}

/// One file per key under a settings directory.
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    directory: PathBuf,
}

impl FileSettingsStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// `<platformConfigDir>/PhotoImporter`, if the platform has one.
    pub fn default_directory() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl SettingsStore for FileSettingsStore {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        let path = self.directory.join(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ConfigError::MissingSetting(key.to_string()))
            }
            Err(e) => Err(ConfigError::ReadSetting {
                key: key.to_string(),
                path,
                source: e,
            }),
        }
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }

    pub fn set(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn get(&self, key: &str) -> Result<String, ConfigError> {
        self.values
            .read()
            .ok()
            .and_then(|values| values.get(key).cloned())
            .ok_or_else(|| ConfigError::MissingSetting(key.to_string()))
    }
}
