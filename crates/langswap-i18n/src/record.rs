//! Immutable per-language translation table.

use std::collections::HashMap;
use std::fmt;

/// One language's translations, keyed by lookup key.
///
/// Records are never mutated once built; a reload produces a new record
/// that replaces the old one in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageRecord {
    code: String,
    translations: HashMap<String, String>,
}

impl LanguageRecord {
    /// Creates a record from a code and its translations.
    pub fn new(code: impl Into<String>, translations: HashMap<String, String>) -> Self {
        Self {
            code: code.into(),
            translations,
        }
    }

    /// Language code, the resource file name without extension.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Translated text for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.translations.get(key).map(String::as_str)
    }

    /// Whether `key` has a translation.
    pub fn contains(&self, key: &str) -> bool {
        self.translations.contains_key(key)
    }

    /// All translations.
    pub const fn translations(&self) -> &HashMap<String, String> {
        &self.translations
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.translations.len()
    }

    /// Whether the record has no keys.
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }
}

impl fmt::Display for LanguageRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LanguageRecord[{}]", self.code)
    }
}
