//! Key to text resolution with fallback-to-key.

use std::sync::Arc;

use crate::store::LanguageStore;

/// Resolves lookup keys against the store's active language.
///
/// Resolution is total: when there is no active language, or the key has no
/// translation, the key itself is returned.
#[derive(Debug, Clone)]
pub struct Translator {
    store: Arc<LanguageStore>,
}

impl Translator {
    /// Creates a translator reading from `store`.
    pub const fn new(store: Arc<LanguageStore>) -> Self {
        Self { store }
    }

    /// Text for `key` in the active language, or `key`.
    pub fn resolve(&self, key: &str) -> String {
        self.store
            .get_active()
            .and_then(|record| record.get(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }

    /// Text for `key` in language `code`, or `key` when either is missing.
    pub fn resolve_in(&self, code: &str, key: &str) -> String {
        self.store
            .get(code)
            .and_then(|record| record.get(key).map(str::to_string))
            .unwrap_or_else(|| key.to_string())
    }

    /// Whether the active language translates `key`.
    pub fn has_translation(&self, key: &str) -> bool {
        self.store
            .get_active()
            .is_some_and(|record| record.contains(key))
    }

    /// The store this translator reads from.
    pub const fn store(&self) -> &Arc<LanguageStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LanguageRecord;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn translator_with_english() -> Translator {
        let store = Arc::new(LanguageStore::new());
        let translations = HashMap::from([("greeting".to_string(), "Hello".to_string())]);
        store.upsert(LanguageRecord::new("en", translations));
        Translator::new(store)
    }

    #[test]
    fn test_no_active_language_returns_key() {
        let translator = translator_with_english();
        assert_eq!(translator.resolve("greeting"), "greeting");
        assert!(!translator.has_translation("greeting"));
    }

    #[test]
    fn test_active_language_translates() {
        let translator = translator_with_english();
        translator.store().set_active("en").unwrap();
        assert_eq!(translator.resolve("greeting"), "Hello");
        assert_eq!(translator.resolve("farewell"), "farewell");
    }

    #[test]
    fn test_resolve_in_specific_language() {
        let translator = translator_with_english();
        assert_eq!(translator.resolve_in("en", "greeting"), "Hello");
        assert_eq!(translator.resolve_in("fr", "greeting"), "greeting");
    }

    #[test]
    fn test_hot_swap_visible_on_next_resolve() {
        let translator = translator_with_english();
        translator.store().set_active("en").unwrap();

        let translations = HashMap::from([("greeting".to_string(), "Hi".to_string())]);
        translator
            .store()
            .upsert(LanguageRecord::new("en", translations));

        assert_eq!(translator.resolve("greeting"), "Hi");
    }

    proptest! {
        #[test]
        fn test_missing_keys_fall_back_to_key(key in "\\PC*") {
            let translator = translator_with_english();
            prop_assert_eq!(translator.resolve(&key), key.clone());

            translator.store().set_active("en").unwrap();
            if key != "greeting" {
                prop_assert_eq!(translator.resolve(&key), key);
            }
        }
    }
}
