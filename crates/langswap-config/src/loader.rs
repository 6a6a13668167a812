//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "LANGSWAP_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {reason}")]
    EnvParse {
        /// Offending variable.
        var: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Configuration validation error
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for langswap_common::LangswapError {
    fn from(err: ConfigError) -> Self {
        Self::config(err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the first available source.
    ///
    /// Order: `LANGSWAP_CONFIG_PATH`, `langswap.yaml`, `langswap.yml`, then
    /// defaults. Environment overrides are applied on top in every case.
    pub fn load() -> Result<Config, ConfigError> {
        let mut config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::read_file(config_path)?
        } else if Path::new("langswap.yaml").exists() {
            Self::read_file("langswap.yaml")?
        } else if Path::new("langswap.yml").exists() {
            Self::read_file("langswap.yml")?
        } else {
            debug!("No configuration file found, using defaults");
            Config::default()
        };

        Self::apply_overrides(&mut config, |name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file with environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let mut config = Self::read_file(path)?;
        Self::apply_overrides(&mut config, |name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text without overrides.
    pub fn from_yaml(content: &str) -> Result<Config, ConfigError> {
        // An empty document deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides read through `lookup`, normally `std::env::var`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("LANGSWAP_RESOURCE_DIR") {
            config.resources.directory = PathBuf::from(dir);
        }

        if let Some(extension) = lookup("LANGSWAP_RESOURCE_EXTENSION") {
            config.resources.extension = extension;
        }

        if let Some(enabled) = lookup("LANGSWAP_WATCH") {
            config.watch.enabled = parse_bool("LANGSWAP_WATCH", &enabled)?;
        }

        if let Some(debounce) = lookup("LANGSWAP_DEBOUNCE_MS") {
            config.watch.debounce_ms =
                debounce.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "LANGSWAP_DEBOUNCE_MS".to_string(),
                    reason: format!("{e}"),
                })?;
        }

        if let Some(state_file) = lookup("LANGSWAP_STATE_FILE") {
            config.selection.state_file = if state_file.is_empty() {
                None
            } else {
                Some(PathBuf::from(state_file))
            };
        }

        if let Some(code) = lookup("LANGSWAP_DEFAULT_LANGUAGE") {
            config.selection.default_language = Some(code);
        }

        if let Some(level) = lookup("LANGSWAP_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::EnvParse {
            var: var.to_string(),
            reason: format!("'{other}' is not a boolean"),
        }),
    }
}
