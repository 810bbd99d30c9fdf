/// File dialog
/// Native open/save choosers; `None` means the user cancelled

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::CapabilityError;

/// Named group of file extensions shown in the chooser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOptions {
    pub title: Option<String>,
    pub default_path: Option<PathBuf>,
    pub filters: Vec<DialogFilter>,
    /// Pick a directory instead of a file (open only)
    pub directory: bool,
}

impl DialogOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_filter(mut self, name: impl Into<String>, extensions: &[&str]) -> Self {
        self.filters.push(DialogFilter {
            name: name.into(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
        });
        self
    }
}

pub trait FileDialog {
    fn open(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError>;

    fn save(&self, options: &DialogOptions) -> Result<Option<PathBuf>, CapabilityError>;
}
