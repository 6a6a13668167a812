//! Hot reload of resource files on content modification.
//!
//! The `notify` callback runs on the watcher's own thread and only forwards
//! matching paths over a channel. A tokio task owns the receiving end and is
//! the single place that parses and upserts, so the store sees one
//! ingestion path.

use notify::event::{EventKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{I18nError, I18nResult};
use crate::parser;
use crate::resource::ResourceDirectory;
use crate::store::LanguageStore;

/// Tuning for the watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchOptions {
    /// Coalescing window for repeated notifications; zero reloads on every
    /// notification.
    pub debounce: Duration,
    /// Capacity of the path channel between the OS watcher and the task.
    pub channel_capacity: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::ZERO,
            channel_capacity: 256,
        }
    }
}

/// Whether a notify event reports a change to file content.
///
/// Renames, deletions, attribute changes and creations without a write are
/// ignored.
pub fn is_content_modification(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any)
    )
}

/// Running watcher. Dropping it stops watching; [`WatchHandle::shutdown`]
/// additionally waits for the reload task to finish.
pub struct WatchHandle {
    watcher: Option<RecommendedWatcher>,
    task: Option<JoinHandle<()>>,
    cancel: CancellationToken,
    directory: PathBuf,
}

impl WatchHandle {
    /// Directory being watched.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Stops watching, releases the OS handle and waits for the reload task.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        drop(self.watcher.take());
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                error!("Language reload task ended abnormally: {}", e);
            }
        }
        info!("Stopped watching {}", self.directory.display());
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle")
            .field("directory", &self.directory)
            .field("active", &self.watcher.is_some())
            .finish_non_exhaustive()
    }
}

/// Starts the hot-reload watcher for `resources`.
///
/// The directory must already exist; creating it is left to the caller.
/// Fails with [`I18nError::WatchSetupFailure`] when it does not, when no
/// tokio runtime is running, or when the OS watcher cannot be registered.
pub fn spawn(
    store: Arc<LanguageStore>,
    resources: &ResourceDirectory,
    options: WatchOptions,
) -> I18nResult<WatchHandle> {
    let directory = resources.path().to_path_buf();
    let setup_failure = |reason: String| I18nError::WatchSetupFailure {
        path: directory.clone(),
        reason,
    };

    if !directory.is_dir() {
        return Err(setup_failure("not a directory".to_string()));
    }
    let runtime =
        tokio::runtime::Handle::try_current().map_err(|e| setup_failure(e.to_string()))?;

    let (tx, rx) = mpsc::channel::<PathBuf>(options.channel_capacity.max(1));
    let filter = resources.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) if is_content_modification(&event.kind) => {
            for path in event.paths.into_iter().filter(|p| filter.matches(p)) {
                // Fails only once the reload task has stopped.
                if tx.blocking_send(path).is_err() {
                    return;
                }
            }
        }
        Ok(_) => {}
        Err(e) => warn!("File watcher error: {}", e),
    })
    .map_err(|e| setup_failure(e.to_string()))?;

    watcher
        .watch(&directory, RecursiveMode::NonRecursive)
        .map_err(|e| setup_failure(e.to_string()))?;

    let cancel = CancellationToken::new();
    let task = runtime.spawn(reload_loop(store, rx, cancel.clone(), options.debounce));

    info!("Watching {} for language changes", directory.display());
    Ok(WatchHandle {
        watcher: Some(watcher),
        task: Some(task),
        cancel,
        directory,
    })
}

async fn reload_loop(
    store: Arc<LanguageStore>,
    mut rx: mpsc::Receiver<PathBuf>,
    cancel: CancellationToken,
    debounce: Duration,
) {
    loop {
        let first = tokio::select! {
            () = cancel.cancelled() => break,
            next = rx.recv() => match next {
                Some(path) => path,
                None => break,
            },
        };

        let mut batch = vec![first];
        if !debounce.is_zero() {
            collect_within(&mut rx, &mut batch, debounce).await;
        }

        for path in batch {
            reload(&store, path).await;
        }
    }
    debug!("Language reload task exiting");
}

/// Adds paths arriving within `window` to `batch`, skipping duplicates.
async fn collect_within(rx: &mut mpsc::Receiver<PathBuf>, batch: &mut Vec<PathBuf>, window: Duration) {
    let deadline = tokio::time::Instant::now() + window;
    while let Ok(Some(path)) = tokio::time::timeout_at(deadline, rx.recv()).await {
        if !batch.contains(&path) {
            batch.push(path);
        }
    }
}

/// Re-parses `path` and stores the result. Failures leave the loaded record
/// untouched.
async fn reload(store: &LanguageStore, path: PathBuf) {
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    info!("Updated language file {}", name);

    let parsed = tokio::task::spawn_blocking(move || parser::parse(&path)).await;
    match parsed {
        Ok(Ok(record)) => {
            let code = record.code().to_string();
            let replaced = store.upsert(record);
            debug!(code = %code, replaced, "Hot swapped language");
        }
        Ok(Err(e)) => warn!("Failed to load {}: {}", name, e),
        Err(e) => error!("Reload of {} panicked: {}", name, e),
    }
}
