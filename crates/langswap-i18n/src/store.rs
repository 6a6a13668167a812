//! In-memory language table with atomic per-code replacement.

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::error::{I18nError, I18nResult};
use crate::events::LanguageEvent;
use crate::parser;
use crate::record::LanguageRecord;

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Outcome of a bulk load.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Codes loaded, in load order
    pub loaded: Vec<String>,
    /// Files skipped and why
    pub failed: Vec<(PathBuf, I18nError)>,
}

/// Loaded languages and the active selection.
///
/// Each code maps to an `Arc` of an immutable record, so replacing a
/// language swaps one pointer and readers holding the old `Arc` keep a
/// complete record. Records are never removed.
pub struct LanguageStore {
    records: DashMap<String, Arc<LanguageRecord>>,
    /// Codes in the order they were first inserted
    order: RwLock<Vec<String>>,
    active: ArcSwapOption<String>,
    events: broadcast::Sender<LanguageEvent>,
}

impl LanguageStore {
    /// Creates an empty store with no active language.
    pub fn new() -> Self {
        Self::with_event_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Creates an empty store whose event channel buffers `capacity` events
    /// per subscriber.
    pub fn with_event_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            records: DashMap::new(),
            order: RwLock::new(Vec::new()),
            active: ArcSwapOption::empty(),
            events,
        }
    }

    /// Parses every path and stores the ones that parse.
    ///
    /// A failing file is logged and skipped; it never stops the others.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> LoadReport {
        let mut report = LoadReport::default();
        for path in paths {
            let path = path.as_ref();
            match parser::parse(path) {
                Ok(record) => {
                    report.loaded.push(record.code().to_string());
                    self.upsert(record);
                }
                Err(e) => {
                    warn!("Failed to load {}: {}", path.display(), e);
                    report.failed.push((path.to_path_buf(), e));
                }
            }
        }
        report
    }

    /// Inserts `record`, or replaces the record with the same code.
    ///
    /// Returns whether an earlier record was replaced. Replacing the active
    /// language sends [`LanguageEvent::ActiveReloaded`].
    pub fn upsert(&self, record: LanguageRecord) -> bool {
        let code = record.code().to_string();
        let replaced = self
            .records
            .insert(code.clone(), Arc::new(record))
            .is_some();

        if !replaced {
            self.order.write().push(code.clone());
        }
        debug!(code = %code, replaced, "Stored language record");

        self.notify(LanguageEvent::Upserted {
            code: code.clone(),
            replaced,
        });
        if self.is_active(&code) {
            self.notify(LanguageEvent::ActiveReloaded { code });
        }
        replaced
    }

    /// Makes `code` the active language.
    ///
    /// Fails with [`I18nError::UnknownLanguageCode`] when no record exists
    /// for `code`; the previous selection is then kept.
    pub fn set_active(&self, code: &str) -> I18nResult<()> {
        if !self.records.contains_key(code) {
            return Err(I18nError::UnknownLanguageCode(code.to_string()));
        }

        let previous = self.active.swap(Some(Arc::new(code.to_string())));
        let previous = previous.map(|p| p.as_ref().clone());
        if previous.as_deref() != Some(code) {
            info!("Updated language to {}", code);
            self.notify(LanguageEvent::ActiveChanged {
                previous,
                current: Some(code.to_string()),
            });
        }
        Ok(())
    }

    /// Unsets the active language.
    pub fn clear_active(&self) {
        if let Some(previous) = self.active.swap(None) {
            info!("Cleared language selection (was {})", previous);
            self.notify(LanguageEvent::ActiveChanged {
                previous: Some(previous.as_ref().clone()),
                current: None,
            });
        }
    }

    /// The active language's current record.
    pub fn get_active(&self) -> Option<Arc<LanguageRecord>> {
        let code = self.active.load_full()?;
        self.get(&code)
    }

    /// The active language code.
    pub fn active_code(&self) -> Option<String> {
        self.active.load_full().map(|code| code.as_ref().clone())
    }

    /// Whether `code` is the active language.
    pub fn is_active(&self, code: &str) -> bool {
        self.active
            .load()
            .as_deref()
            .is_some_and(|active| active == code)
    }

    /// The current record for `code`.
    pub fn get(&self, code: &str) -> Option<Arc<LanguageRecord>> {
        self.records.get(code).map(|entry| Arc::clone(entry.value()))
    }

    /// Whether a record exists for `code`.
    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    /// Loaded codes in discovery order.
    pub fn codes(&self) -> Vec<String> {
        self.order.read().clone()
    }

    /// Position of `code` in discovery order.
    pub fn index_of(&self, code: &str) -> Option<usize> {
        self.order.read().iter().position(|c| c == code)
    }

    /// Code at `index` in discovery order.
    pub fn code_at(&self, index: usize) -> Option<String> {
        self.order.read().get(index).cloned()
    }

    /// Number of loaded languages.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no language is loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: LanguageEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.events.send(event);
    }
}

impl Default for LanguageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LanguageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageStore")
            .field("codes", &self.codes())
            .field("active", &self.active_code())
            .finish_non_exhaustive()
    }
}
