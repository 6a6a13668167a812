//! Test utilities and shared test helpers for langswap.
//!
//! Available to other crates through the `testing` feature.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
#[cfg(feature = "tempfile")]
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Writes `<dir>/<code>.txt` with the given content and returns its path.
pub fn write_resource(dir: &Path, code: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{code}.txt"));
    fs::write(&path, content).expect("Failed to write resource file");
    path
}

/// Sample resource file contents.
pub mod resource_fixtures {
    /// A small English resource.
    pub const ENGLISH: &str = "menu.start=Start\nmenu.quit=Quit\n\ngreeting=Hello\n";

    /// The French counterpart of [`ENGLISH`], missing `greeting`.
    pub const FRENCH: &str = "menu.start=Commencer\nmenu.quit=Quitter\n";

    /// A resource whose second line has no separator.
    pub const MALFORMED: &str = "menu.start=Start\nbroken\n";
}
