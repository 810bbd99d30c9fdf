/// Capability doubles
/// In-memory event bus, dialog, file and key-value implementations that
/// record what they were asked to do

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::capabilities::{
    DialogOptions, EventBus, EventHandler, FileDialog, FileStore, KeyValueStore, ListenerId,
    LocalEventBus,
};
use crate::error::CapabilityError;

/// Event bus that delivers like [`LocalEventBus`] and keeps every emission
pub struct RecordingEventBus {
    inner: LocalEventBus,
    emitted: Mutex<Vec<(String, Value)>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self {
            inner: LocalEventBus::new(),
            emitted: Mutex::new(Vec::new()),
        }
    }

    pub fn emitted(&self) -> Vec<(String, Value)> {
        self.emitted.lock().clone()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner.listener_count(event)
    }
}

impl Default for RecordingEventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus for RecordingEventBus {
    fn emit(&self, event: &str, payload: Value) -> Result<(), CapabilityError> {
        self.emitted.lock().push((event.to_string(), payload.clone()));
        self.inner.emit(event, payload)
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Result<ListenerId, CapabilityError> {
        self.inner.listen(event, handler)
    }

    fn unlisten(&self, id: ListenerId) {
        self.inner.unlisten(id)
    }
}

/// Dialog answering from a queue of picks; an empty queue means "cancelled"
pub struct ScriptedFileDialog {
    picks: Mutex<VecDeque<Option<PathBuf>>>,
    requests: Mutex<Vec<DialogOptions>>,
}

impl ScriptedFileDialog {
    pub fn new() -> Self {
        Self {
            picks: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn pick_next(&self, path: impl Into<PathBuf>) {
        self.picks.lock().push_back(Some(path.into()));
    }

    pub fn cancel_next(&self) {
        self.picks.lock().push_back(None);
    }

    /// Options of every open/save call so far
    pub fn requests(&self) -> Vec<DialogOptions> {
        self.requests.lock().clone()
    }

    fn answer(&self, options: &DialogOptions) -> Option<PathBuf> {
        self.requests.lock().push(options.clone());
        self.picks.lock().pop_front().flatten()
    }
}

impl Default for ScriptedFileDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDialog for ScriptedFileDialog {
    fn open(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError> {
        Ok(self.answer(options))
    }

    fn save(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError> {
        Ok(self.answer(options))
    }
}

/// Files kept in a map keyed by path
pub struct MemoryFileStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

impl Default for MemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FileStore for MemoryFileStore {
    fn read_file(&self, path: &Path) -> Result<Vec<u8>, CapabilityError> {
        self.files.lock().get(path).cloned().ok_or_else(|| {
            CapabilityError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("{} not found", path.display()),
            ))
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), CapabilityError> {
        self.files.lock().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn read_text_file(&self, path: &Path) -> Result<String, CapabilityError> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| {
            CapabilityError::Io(std::io::Error::new(ErrorKind::InvalidData, e))
        })
    }

    fn write_text_file(&self, path: &Path, contents: &str) -> Result<(), CapabilityError> {
        self.write_file(path, contents.as_bytes())
    }
}

/// Key-value store whose `save`/`load` copy to and from an in-memory snapshot
pub struct MemoryKeyValueStore {
    entries: Mutex<Map<String, Value>>,
    saved: Mutex<Map<String, Value>>,
    saves: Mutex<usize>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Map::new()),
            saved: Mutex::new(Map::new()),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl Default for MemoryKeyValueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.lock().insert(key.to_string(), value);
    }

    fn save(&self) -> Result<(), CapabilityError> {
        *self.saved.lock() = self.entries.lock().clone();
        *self.saves.lock() += 1;
        Ok(())
    }

    fn load(&self) -> Result<(), CapabilityError> {
        *self.entries.lock() = self.saved.lock().clone();
        Ok(())
    }
}
