//! # Langswap I18n
//!
//! Runtime translation registry with hot reload.
//!
//! Languages are flat `key=value` resource files, one per language, named
//! after their language code. This crate provides:
//!
//! - Resource parsing into immutable [`LanguageRecord`]s
//! - A [`LanguageStore`] with atomic per-language replacement and an active
//!   selection
//! - A file watcher that re-parses modified files and swaps them in
//! - A [`Translator`] that falls back to the lookup key
//! - [`LanguageRegistry`], which ties these together for a host
//!
//! # Example
//!
//! ```rust,no_run
//! use langswap_config::Config;
//! use langswap_i18n::LanguageRegistry;
//!
//! # async fn example() -> Result<(), langswap_i18n::I18nError> {
//! let registry = LanguageRegistry::open(&Config::default());
//! registry.select("fr")?;
//! println!("{}", registry.resolve("menu.start"));
//! registry.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod events;
pub mod parser;
pub mod record;
pub mod registry;
pub mod resolver;
pub mod resource;
pub mod selection;
pub mod store;
pub mod watcher;

pub use error::{I18nError, I18nResult};
pub use events::LanguageEvent;
pub use parser::{language_code, parse, parse_content};
pub use record::LanguageRecord;
pub use registry::LanguageRegistry;
pub use resolver::Translator;
pub use resource::ResourceDirectory;
pub use selection::{JsonSelectionFile, MemorySelection, SelectionPersistence};
pub use store::{LanguageStore, LoadReport};
pub use watcher::{WatchHandle, WatchOptions};
