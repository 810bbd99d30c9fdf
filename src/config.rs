/// App configuration
/// Runtime knobs read from the environment; window and bundle settings
/// live in tauri.conf.json

use log::LevelFilter;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

pub const LOG_LEVEL_VAR: &str = "WHISPER_TAURI_LOG";
pub const STORE_FILE_VAR: &str = "WHISPER_TAURI_STORE";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;
const DEFAULT_STORE_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Level handed to the log plugin in debug builds
    pub log_level: LevelFilter,
    /// Key-value store file name, relative to the app data directory
    pub store_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL,
            store_file: DEFAULT_STORE_FILE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values keep the defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = non_blank(lookup(LOG_LEVEL_VAR)) {
            match LevelFilter::from_str(&level) {
                Ok(level) => config.log_level = level,
                Err(_) => log::warn!(
                    "[Config] ignoring {}={:?}, using {}",
                    LOG_LEVEL_VAR,
                    level,
                    DEFAULT_LOG_LEVEL
                ),
            }
        }

        if let Some(file) = non_blank(lookup(STORE_FILE_VAR)) {
            if stays_inside(Path::new(&file)) {
                config.store_file = file;
            } else {
                log::warn!(
                    "[Config] ignoring {}={:?}, must be relative to the data directory; using {}",
                    STORE_FILE_VAR,
                    file,
                    DEFAULT_STORE_FILE
                );
            }
        }

        config
    }
}

/// Where app data goes when the platform reports no data directory
pub fn fallback_data_dir() -> PathBuf {
    std::env::temp_dir().join("whisper-tauri")
}

/// Relative path made only of plain names (and `.`)
fn stays_inside(path: &Path) -> bool {
    let mut names = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => names += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    names > 0
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])), AppConfig::default());
    }

    #[test]
    fn reads_level_case_insensitively() {
        let config = AppConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "DEBUG")]));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn bad_level_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(LOG_LEVEL_VAR, "chatty")]));
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn store_file_override_is_trimmed() {
        let config = AppConfig::from_lookup(lookup(&[(STORE_FILE_VAR, "  prefs.json ")]));
        assert_eq!(config.store_file, "prefs.json");
    }

    #[test]
    fn nested_store_file_is_allowed() {
        let config = AppConfig::from_lookup(lookup(&[(STORE_FILE_VAR, "prefs/app.json")]));
        assert_eq!(config.store_file, "prefs/app.json");
    }

    #[test]
    fn absolute_store_file_falls_back() {
        let config = AppConfig::from_lookup(lookup(&[(STORE_FILE_VAR, "/etc/app.json")]));
        assert_eq!(config.store_file, "settings.json");
    }

    #[test]
    fn parent_dir_store_file_falls_back() {
        for value in ["../x.json", "prefs/../../x.json", "."] {
            let config = AppConfig::from_lookup(lookup(&[(STORE_FILE_VAR, value)]));
            assert_eq!(config.store_file, "settings.json", "accepted {value:?}");
        }
    }

    #[test]
    fn fallback_data_dir_is_under_temp() {
        assert!(fallback_data_dir().starts_with(std::env::temp_dir()));
    }

    #[test]
    fn blank_store_file_keeps_default() {
        let config = AppConfig::from_lookup(lookup(&[(STORE_FILE_VAR, "   ")]));
        assert_eq!(config.store_file, "settings.json");
    }
}
