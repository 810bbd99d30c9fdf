/// Greet command
/// Example command that demonstrates Tauri IPC communication
/// Called from frontend via: invoke("greet", { name: "value" })

/// Build the greeting for `name`; empty names are greeted too
pub fn greeting(name: &str) -> String {
    format!("Hello, {}! You've been greeted from Rust!", name)
}

#[cfg(feature = "desktop")]
#[tauri::command]
pub fn greet(name: &str) -> String {
    log::debug!("[Greet] greeting {:?}", name);
    greeting(name)
}
