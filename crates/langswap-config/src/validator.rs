//! Runtime validation of loaded configuration.

use crate::{schema::Config, ConfigError};

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.resources.directory.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "resources.directory cannot be empty".to_string(),
            ));
        }

        let extension = &config.resources.extension;
        if extension.is_empty() {
            return Err(ConfigError::Invalid(
                "resources.extension cannot be empty".to_string(),
            ));
        }
        if extension.contains(['.', '/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "resources.extension '{extension}' must be a bare extension without dots or separators"
            )));
        }

        if config.watch.channel_capacity == 0 {
            return Err(ConfigError::Invalid(
                "watch.channel_capacity must be greater than zero".to_string(),
            ));
        }

        if let Some(code) = &config.selection.default_language {
            if code.is_empty() {
                return Err(ConfigError::Invalid(
                    "selection.default_language cannot be an empty string".to_string(),
                ));
            }
        }

        if config.logging.level.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
