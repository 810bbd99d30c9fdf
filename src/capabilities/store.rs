/// Key-value store
/// JSON values by key, held in memory until `save`, like the store plugin

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::CapabilityError;

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<Value>;

    fn set(&self, key: &str, value: Value);

    /// Persist the current entries
    fn save(&self) -> Result<(), CapabilityError>;

    /// Replace the in-memory entries with the persisted ones
    fn load(&self) -> Result<(), CapabilityError>;
}

/// Store backed by a single JSON object file
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Create a store for `path` without touching the disk
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(Map::new()),
        }
    }

    /// Create a store and load whatever is already on disk
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CapabilityError> {
        let store = Self::new(path);
        store.load()?;
        Ok(store)
    }

    /// Open for startup: an unreadable or corrupt file is logged and the
    /// store starts empty, so the file is rewritten on the next `save`
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let store = Self::new(path);
        if let Err(e) = store.load() {
            log::warn!(
                "[Store] could not load {}, starting empty: {}",
                store.path.display(),
                e
            );
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn keys(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn delete(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn save(&self) -> Result<(), CapabilityError> {
        let json = serde_json::to_vec_pretty(&*self.entries.lock())?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        log::debug!("[Store] saved {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<(), CapabilityError> {
        let entries = match fs::read(&self.path) {
            Ok(bytes) => serde_json::from_slice::<Map<String, Value>>(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        log::debug!("[Store] loaded {} key(s) from {}", entries.len(), self.path.display());
        *self.entries.lock() = entries;
        Ok(())
    }
}
