//! Registry facade wiring the store, watcher, resolver and selection
//! persistence together for a host application.

use langswap_config::Config;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use crate::error::I18nResult;
use crate::events::LanguageEvent;
use crate::resolver::Translator;
use crate::resource::ResourceDirectory;
use crate::selection::{JsonSelectionFile, MemorySelection, SelectionPersistence};
use crate::store::LanguageStore;
use crate::watcher::{self, WatchHandle, WatchOptions};

/// The process-wide translation registry.
pub struct LanguageRegistry {
    store: Arc<LanguageStore>,
    translator: Translator,
    resources: ResourceDirectory,
    persistence: Box<dyn SelectionPersistence>,
    watch: Option<WatchHandle>,
}

impl LanguageRegistry {
    /// Opens the registry described by `config`, persisting the selection
    /// in the configured state file.
    ///
    /// Must be called from within a tokio runtime when watching is enabled.
    pub fn open(config: &Config) -> Self {
        let persistence: Box<dyn SelectionPersistence> = match &config.selection.state_file {
            Some(path) => Box::new(JsonSelectionFile::new(path)),
            None => Box::new(MemorySelection::default()),
        };
        Self::open_with(config, persistence)
    }

    /// Opens the registry with a host-provided persistence mechanism.
    ///
    /// Loading never fails as a whole: unreadable or malformed files are
    /// skipped and a watcher that cannot start leaves hot reload disabled.
    pub fn open_with(config: &Config, persistence: Box<dyn SelectionPersistence>) -> Self {
        let resources =
            ResourceDirectory::new(&config.resources.directory, &config.resources.extension);
        let store = Arc::new(LanguageStore::new());

        if config.resources.create_directory {
            if let Err(e) = resources.ensure_exists() {
                warn!("{}", e);
            }
        }

        match resources.scan() {
            Ok(paths) => {
                let report = store.load_all(&paths);
                if !report.failed.is_empty() {
                    warn!("Skipped {} unloadable language files", report.failed.len());
                }
            }
            Err(e) => warn!("No languages loaded: {}", e),
        }
        info!("Loaded languages [{}]", store.codes().join(", "));

        let mut registry = Self {
            translator: Translator::new(Arc::clone(&store)),
            store,
            resources,
            persistence,
            watch: None,
        };
        registry.restore_selection(config.selection.default_language.as_deref());

        if config.watch.enabled {
            let options = WatchOptions {
                debounce: Duration::from_millis(config.watch.debounce_ms),
                channel_capacity: config.watch.channel_capacity,
            };
            match watcher::spawn(Arc::clone(&registry.store), &registry.resources, options) {
                Ok(handle) => registry.watch = Some(handle),
                Err(e) => error!("Hot reload disabled: {}", e),
            }
        }

        registry
    }

    /// Selects the persisted language, else `default_language`.
    fn restore_selection(&self, default_language: Option<&str>) {
        let persisted = match self.persistence.load() {
            Ok(code) => code,
            Err(e) => {
                warn!("Ignoring saved language selection: {}", e);
                None
            }
        };

        for code in persisted.as_deref().into_iter().chain(default_language) {
            match self.store.set_active(code) {
                Ok(()) => {
                    info!("Initializing language to {}", code);
                    return;
                }
                Err(e) => warn!("Cannot restore language selection: {}", e),
            }
        }
    }

    /// Text for `key` in the active language, or `key`.
    pub fn resolve(&self, key: &str) -> String {
        self.translator.resolve(key)
    }

    /// Activates `code` and persists the choice.
    ///
    /// An unknown code is rejected and the current selection kept. A
    /// persistence failure is logged; the selection still changes.
    pub fn select(&self, code: &str) -> I18nResult<()> {
        if let Err(e) = self.store.set_active(code) {
            warn!("Rejected language selection: {}", e);
            return Err(e);
        }
        self.persist();
        Ok(())
    }

    /// Activates the language at picker position `index`.
    ///
    /// An index past the loaded languages clears the selection, which lets a
    /// host list its own built-in languages before or after these.
    pub fn select_index(&self, index: usize) -> Option<String> {
        match self.store.code_at(index) {
            Some(code) => match self.select(&code) {
                Ok(()) => Some(code),
                Err(_) => None,
            },
            None => {
                self.deselect();
                None
            }
        }
    }

    /// Clears the selection and persists that nothing is selected.
    pub fn deselect(&self) {
        self.store.clear_active();
        self.persist();
    }

    fn persist(&self) {
        let code = self.store.active_code();
        if let Err(e) = self.persistence.save(code.as_deref()) {
            warn!("Failed to save language selection: {}", e);
        }
    }

    /// Loaded codes in discovery order.
    pub fn codes(&self) -> Vec<String> {
        self.store.codes()
    }

    /// The active language code.
    pub fn active_code(&self) -> Option<String> {
        self.store.active_code()
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.store.subscribe()
    }

    /// The underlying store.
    pub const fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }

    /// A resolver sharing this registry's store.
    pub fn translator(&self) -> Translator {
        self.translator.clone()
    }

    /// The resource directory.
    pub const fn resources(&self) -> &ResourceDirectory {
        &self.resources
    }

    /// Whether hot reload is running.
    pub const fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    /// Stops hot reload and releases the watch handle.
    pub async fn shutdown(mut self) {
        if let Some(watch) = self.watch.take() {
            watch.shutdown().await;
        }
    }
}

impl std::fmt::Debug for LanguageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageRegistry")
            .field("store", &self.store)
            .field("resources", &self.resources)
            .field("watch", &self.watch)
            .finish_non_exhaustive()
    }
}
