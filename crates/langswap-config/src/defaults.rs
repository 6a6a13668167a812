//! Default values for every configuration section.

use crate::schema::{Config, LogConfig, ResourcesConfig, SelectionConfig, WatchConfig};
use langswap_common::LogFormat;
use std::path::PathBuf;

/// Default resource directory, relative to the working directory.
pub const DEFAULT_RESOURCE_DIR: &str = "assets/i18n";

/// Default resource file extension.
pub const DEFAULT_RESOURCE_EXTENSION: &str = "txt";

/// Default selection state file.
pub const DEFAULT_STATE_FILE: &str = "langswap-state.json";

/// Default watcher channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

impl Default for Config {
    fn default() -> Self {
        Self {
            resources: ResourcesConfig::default(),
            watch: WatchConfig::default(),
            selection: SelectionConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_RESOURCE_DIR),
            extension: DEFAULT_RESOURCE_EXTENSION.to_string(),
            create_directory: true,
        }
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 0,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            state_file: Some(PathBuf::from(DEFAULT_STATE_FILE)),
            default_language: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.resources.directory, PathBuf::from("assets/i18n"));
        assert_eq!(config.resources.extension, "txt");
        assert!(config.watch.enabled);
        assert_eq!(config.watch.debounce_ms, 0);
    }
}
