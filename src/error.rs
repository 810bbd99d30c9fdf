/// Error types
/// One enum per boundary: the command bridge and the host capabilities

use std::path::PathBuf;

/// Error returned when a bridge call does not produce a usable result.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// No handler is registered under the requested command name.
    #[error("command `{0}` not found")]
    UnknownCommand(String),

    /// The host handler ran and rejected the call.
    #[error("command `{command}` rejected: {message}")]
    Rejected { command: String, message: String },

    /// The arguments could not be turned into a JSON object.
    #[error("failed to encode command arguments: {0}")]
    Encode(#[source] serde_json::Error),

    /// The host answered with a value of the wrong shape.
    #[error("unexpected result from command `{command}`: {source}")]
    Decode {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}

impl BridgeError {
    pub fn rejected(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Error returned by the event, dialog, file and key-value capabilities.
#[derive(Debug, thiserror::Error)]
pub enum CapabilityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Path escapes the directory a file store is scoped to.
    #[error("path `{}` is outside the allowed scope", .0.display())]
    OutsideScope(PathBuf),

    /// Failure reported by the desktop runtime.
    #[error("host error: {0}")]
    Host(String),
}
