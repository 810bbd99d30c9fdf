/// Services module
/// Adapters between the app's capability traits and the desktop runtime
/// Only built with the `desktop` feature

pub mod host;

pub use host::HostServices;
