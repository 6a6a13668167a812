//! Persistence of the selected language across restarts.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{I18nError, I18nResult};

/// Host-side storage for the selected language code.
pub trait SelectionPersistence: Send + Sync {
    /// The persisted code, if any.
    fn load(&self) -> I18nResult<Option<String>>;

    /// Persists `code`; `None` records that nothing is selected.
    fn save(&self, code: Option<&str>) -> I18nResult<()>;
}

/// On-disk shape of the state file.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SelectionState {
    #[serde(rename = "languageCode", default)]
    language_code: Option<String>,
}

/// Stores the selection as `{"languageCode": ...}` in a JSON file.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the target, so a crash never leaves a truncated state file.
#[derive(Debug, Clone)]
pub struct JsonSelectionFile {
    path: PathBuf,
}

impl JsonSelectionFile {
    /// Uses `path` as the state file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The state file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn failure(&self, reason: impl std::fmt::Display) -> I18nError {
        I18nError::Persistence {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl SelectionPersistence for JsonSelectionFile {
    fn load(&self) -> I18nResult<Option<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.failure(e)),
        };
        let state: SelectionState = serde_json::from_str(&content).map_err(|e| self.failure(e))?;
        Ok(state.language_code)
    }

    fn save(&self, code: Option<&str>) -> I18nResult<()> {
        let state = SelectionState {
            language_code: code.map(str::to_string),
        };
        let json = serde_json::to_string_pretty(&state).map_err(|e| self.failure(e))?;

        let directory = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(directory).map_err(|e| self.failure(e))?;

        let mut temp = tempfile::NamedTempFile::new_in(directory).map_err(|e| self.failure(e))?;
        temp.write_all(json.as_bytes()).map_err(|e| self.failure(e))?;
        temp.persist(&self.path).map_err(|e| self.failure(e.error))?;

        debug!("Saved language selection to {}", self.path.display());
        Ok(())
    }
}

/// Keeps the selection in memory only.
#[derive(Debug, Default)]
pub struct MemorySelection {
    code: Mutex<Option<String>>,
}

impl MemorySelection {
    /// Starts with `code` already persisted.
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Mutex::new(Some(code.into())),
        }
    }
}

impl SelectionPersistence for MemorySelection {
    fn load(&self) -> I18nResult<Option<String>> {
        Ok(self.code.lock().clone())
    }

    fn save(&self, code: Option<&str>) -> I18nResult<()> {
        *self.code.lock() = code.map(str::to_string);
        Ok(())
    }
}
