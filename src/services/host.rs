/// Host adapters
/// Capability traits implemented over the running Tauri app

use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::path::PathBuf;
use tauri::{AppHandle, Emitter, EventId, Listener, Manager, Runtime};
use tauri_plugin_dialog::DialogExt;

use crate::capabilities::{
    DialogOptions, EventBus, EventHandler, FileDialog, JsonFileStore, ListenerId, ScopedFileStore,
};
use crate::config::{fallback_data_dir, AppConfig};
use crate::error::CapabilityError;

/// Events shared with the webview through the app handle
pub struct TauriEventBus<R: Runtime> {
    app: AppHandle<R>,
    listeners: Mutex<HashMap<ListenerId, EventId>>,
    next_id: Mutex<u32>,
}

impl<R: Runtime> TauriEventBus<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self {
            app,
            listeners: Mutex::new(HashMap::new()),
            next_id: Mutex::new(1),
        }
    }
}

impl<R: Runtime> EventBus for TauriEventBus<R> {
    fn emit(&self, event: &str, payload: Value) -> Result<(), CapabilityError> {
        self.app
            .emit(event, payload)
            .map_err(|e| CapabilityError::Host(format!("Failed to emit {}: {}", event, e)))
    }

    fn listen(&self, event: &str, handler: EventHandler) -> Result<ListenerId, CapabilityError> {
        let event_id = self.app.listen(event.to_string(), move |event| {
            // Payloads arrive as JSON text; anything unparsable is delivered as null
            let payload = serde_json::from_str(event.payload()).unwrap_or(Value::Null);
            handler(payload);
        });

        let id = ListenerId::take_next(&mut self.next_id.lock());
        self.listeners.lock().insert(id, event_id);
        Ok(id)
    }

    fn unlisten(&self, id: ListenerId) {
        if let Some(event_id) = self.listeners.lock().remove(&id) {
            self.app.unlisten(event_id);
        }
    }
}

/// Native choosers from the dialog plugin.
///
/// The calls block until the user answers, so never call them from the
/// main thread.
pub struct TauriFileDialog<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> TauriFileDialog<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    fn builder(&self, options: &DialogOptions) -> tauri_plugin_dialog::FileDialogBuilder<R> {
        let mut builder = self.app.dialog().file();
        if let Some(title) = &options.title {
            builder = builder.set_title(title);
        }
        if let Some(path) = &options.default_path {
            if path.is_dir() {
                builder = builder.set_directory(path);
            } else {
                if let Some(parent) = path.parent() {
                    builder = builder.set_directory(parent);
                }
                if let Some(name) = path.file_name() {
                    builder = builder.set_file_name(name.to_string_lossy());
                }
            }
        }
        for filter in &options.filters {
            let extensions: Vec<&str> = filter.extensions.iter().map(String::as_str).collect();
            builder = builder.add_filter(&filter.name, &extensions);
        }
        builder
    }
}

fn into_path(
    picked: Option<tauri_plugin_dialog::FilePath>,
) -> Result<Option<PathBuf>, CapabilityError> {
    picked
        .map(|p| p.into_path().map_err(|e| CapabilityError::Host(e.to_string())))
        .transpose()
}

impl<R: Runtime> FileDialog for TauriFileDialog<R> {
    fn open(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError> {
        let builder = self.builder(options);
        let picked = if options.directory {
            builder.blocking_pick_folder()
        } else {
            builder.blocking_pick_file()
        };
        into_path(picked)
    }

    fn save(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError> {
        into_path(self.builder(options).blocking_save_file())
    }
}

/// Capabilities available to commands through managed state
pub struct HostServices<R: Runtime> {
    pub events: TauriEventBus<R>,
    pub dialog: TauriFileDialog<R>,
    pub files: ScopedFileStore,
    pub store: JsonFileStore,
}

impl<R: Runtime> HostServices<R> {
    /// Wire the capabilities to `app`, rooting files and the store in the
    /// app data directory. Never fails: none of this is needed to greet
    pub fn new(app: &AppHandle<R>, config: &AppConfig) -> Self {
        let data_dir = app.path().app_data_dir().unwrap_or_else(|e| {
            let fallback = fallback_data_dir();
            log::warn!(
                "[Host] no app data directory ({}), using {}",
                e,
                fallback.display()
            );
            fallback
        });
        log::info!("[Host] data directory {}", data_dir.display());

        Self {
            events: TauriEventBus::new(app.clone()),
            dialog: TauriFileDialog::new(app.clone()),
            files: ScopedFileStore::new(data_dir.join("files")),
            store: JsonFileStore::open_or_empty(data_dir.join(&config.store_file)),
        }
    }
}
