//! Application-wide error type and result alias.

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, LangswapError>;

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum LangswapError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Translation registry error.
    #[error("Translation registry error: {0}")]
    I18n(String),

    /// Logging setup error.
    #[error("Logging setup error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LangswapError {
    /// Builds a configuration error from anything displayable.
    pub fn config(message: impl std::fmt::Display) -> Self {
        Self::Config(message.to_string())
    }

    /// Builds a registry error from anything displayable.
    pub fn i18n(message: impl std::fmt::Display) -> Self {
        Self::I18n(message.to_string())
    }
}
