/// Models module
/// Shared data types and structures between frontend and backend
/// All types here should be serializable/deserializable for IPC

use serde::{Deserialize, Serialize};

/// Name of the only host command the view calls
pub const GREET_COMMAND: &str = "greet";

/// Arguments of one `greet` call, built fresh for every submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetRequest {
    pub name: String,
}

impl GreetRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// What the host sends back: the greeting text, shown as-is
pub type GreetResponse = String;
