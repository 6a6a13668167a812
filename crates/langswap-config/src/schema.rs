//! Configuration schema definitions using serde.

use langswap_common::{LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{ConfigError, ConfigValidator};

/// Main configuration structure for langswap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resource file location.
    pub resources: ResourcesConfig,
    /// Hot-reload configuration.
    pub watch: WatchConfig,
    /// Persisted language selection.
    pub selection: SelectionConfig,
    /// Logging configuration.
    pub logging: LogConfig,
}

/// Where language resource files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Directory scanned for resource files.
    pub directory: PathBuf,
    /// Resource file extension, without the leading dot.
    pub extension: String,
    /// Whether to create the directory when it is missing. When false and
    /// the directory is absent, nothing loads and hot reload stays off.
    pub create_directory: bool,
}

/// File watching configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Whether resource files are reloaded on change.
    pub enabled: bool,
    /// Window in milliseconds over which repeated notifications for one
    /// file are coalesced. Zero disables coalescing.
    pub debounce_ms: u64,
    /// Capacity of the watcher to store channel.
    pub channel_capacity: usize,
}

/// Selection persistence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// JSON file holding the selected language code.
    pub state_file: Option<PathBuf>,
    /// Language selected when nothing was persisted.
    pub default_language: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Level filter directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

impl LogConfig {
    /// Converts into the logging bootstrap settings.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file.clone(),
            ..LoggingConfig::default()
        }
    }
}
