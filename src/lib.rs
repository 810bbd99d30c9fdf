/// Whisper Tauri
/// Desktop shell with a Tauri backend and a single greet form
///
/// Module structure:
/// - commands: Tauri IPC handlers (frontend → backend)
/// - bridge: the command surface as seen from the view, plus the in-process registry
/// - view: form state and the submit flow
/// - capabilities: event bus, file dialog, file I/O and key-value store interfaces
/// - services: capability adapters over the desktop runtime (`desktop` feature)
/// - testing: doubles for all of the above (`testing` feature)
/// - models: Shared data types

pub mod bridge;
pub mod capabilities;
pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod view;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(feature = "desktop")]
pub mod services;

pub use bridge::{CommandBridge, CommandRegistry, InvokeArgs};
pub use config::AppConfig;
pub use error::{BridgeError, CapabilityError};
pub use models::{GreetRequest, GreetResponse, GREET_COMMAND};
pub use view::{GreetView, ViewState};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    let config = AppConfig::from_env();

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_fs::init())
        .setup(move |app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(config.log_level)
                        .build(),
                )?;
            }
            let services = services::HostServices::new(app.handle(), &config);
            app.manage(services);
            log::info!("App ready - greet command registered");
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![commands::greet::greet])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
