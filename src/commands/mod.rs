/// Commands module
/// All Tauri commands (IPC handlers) are defined here
/// Commands act as the boundary between frontend and backend (Rust)

pub mod greet;

pub use greet::greeting;
