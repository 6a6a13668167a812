//! Error types for the language registry

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, selecting or watching languages
#[derive(Error, Debug)]
pub enum I18nError {
    /// A resource line has no `=` separator
    #[error("{}:{line_number}: line \"{line}\" has no = sign", .path.display())]
    MalformedLine {
        /// Resource file being parsed
        path: PathBuf,
        /// One-based line number
        line_number: usize,
        /// The offending line
        line: String,
    },

    /// A resource file could not be opened or read
    #[error("Failed to read resource file {}: {source}", .path.display())]
    UnreadableFile {
        /// Resource file being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A resource file name does not yield a language code
    #[error("Cannot derive a language code from {}", .path.display())]
    InvalidFileName {
        /// Offending path
        path: PathBuf,
    },

    /// Selection of a code that has no loaded record
    #[error("Unknown language code: {0}")]
    UnknownLanguageCode(String),

    /// The file watcher could not be established
    #[error("Failed to watch {}: {reason}", .path.display())]
    WatchSetupFailure {
        /// Directory that was to be watched
        path: PathBuf,
        /// Why the watch failed
        reason: String,
    },

    /// The selection state file could not be read or written
    #[error("Failed to persist selection in {}: {reason}", .path.display())]
    Persistence {
        /// State file
        path: PathBuf,
        /// Why the operation failed
        reason: String,
    },
}

impl From<I18nError> for langswap_common::LangswapError {
    fn from(err: I18nError) -> Self {
        Self::i18n(err)
    }
}

/// Result type for registry operations
pub type I18nResult<T> = Result<T, I18nError>;
