//! Resource directory discovery

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{I18nError, I18nResult};

/// The directory holding one resource file per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDirectory {
    /// Base directory for language resources
    path: PathBuf,
    /// Extension of resource files, without the dot
    extension: String,
}

impl ResourceDirectory {
    /// Create a new resource directory descriptor
    pub fn new<P: AsRef<Path>>(path: P, extension: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            extension: extension.into(),
        }
    }

    /// Get the base directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the resource file extension
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Create the directory if it does not exist yet
    pub fn ensure_exists(&self) -> I18nResult<()> {
        if !self.path.is_dir() {
            fs::create_dir_all(&self.path).map_err(|source| I18nError::UnreadableFile {
                path: self.path.clone(),
                source,
            })?;
            info!("Created resource directory {}", self.path.display());
        }
        Ok(())
    }

    /// Whether `path` names a resource file by its extension
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// List the resource files in the directory, sorted by path
    pub fn scan(&self) -> I18nResult<Vec<PathBuf>> {
        let unreadable = |source| I18nError::UnreadableFile {
            path: self.path.clone(),
            source,
        };

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.path).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if path.is_file() && self.matches(&path) {
                files.push(path);
            }
        }
        files.sort();

        debug!(
            "Found {} resource files in {}",
            files.len(),
            self.path.display()
        );
        Ok(files)
    }
}
