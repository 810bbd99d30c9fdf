/// Host capabilities the app is structured to use.
/// Each capability is a narrow trait so code built on it depends on the
/// interface and not on a concrete desktop binding. The in-crate
/// implementations here run without a desktop runtime; the desktop shell
/// adds adapters over the Tauri plugins, and the testing module provides
/// recording doubles.

pub mod dialog;
pub mod events;
pub mod files;
pub mod store;

pub use dialog::{DialogFilter, DialogOptions, FileDialog};
pub use events::{EventBus, EventHandler, ListenerId, LocalEventBus};
pub use files::{FileStore, ScopedFileStore};
pub use store::{JsonFileStore, KeyValueStore};
