//! Integration tests for langswap-i18n crate.
//!
//! These tests load real resource directories and exercise hot reload
//! through the OS file watcher.

use langswap_common::test_utils::{init_test_logging, resource_fixtures, write_resource};
use langswap_config::Config;
use langswap_i18n::{
    I18nError, JsonSelectionFile, LanguageEvent, LanguageRegistry, LanguageStore, MemorySelection,
    SelectionPersistence,
};
use std::path::Path;
use std::time::Duration;
use tokio::sync::broadcast;

fn config_for(dir: &Path, watch: bool) -> Config {
    let mut config = Config::default();
    config.resources.directory = dir.to_path_buf();
    config.watch.enabled = watch;
    config.selection.state_file = Some(dir.join("state.json"));
    config
}

async fn wait_for<F>(events: &mut broadcast::Receiver<LanguageEvent>, mut predicate: F) -> bool
where
    F: FnMut(&LanguageEvent) -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Ok(Ok(event)) if predicate(&event) => return true,
            Ok(Ok(_) | Err(broadcast::error::RecvError::Lagged(_))) => {}
            Ok(Err(broadcast::error::RecvError::Closed)) | Err(_) => return false,
        }
    }
}

#[test]
fn test_malformed_file_is_isolated() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let en = write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let fr = write_resource(dir.path(), "fr", resource_fixtures::MALFORMED);

    let store = LanguageStore::new();
    let report = store.load_all(&[en, fr]);

    assert_eq!(report.loaded, vec!["en".to_string()]);
    assert_eq!(report.failed.len(), 1);
    assert!(matches!(report.failed[0].1, I18nError::MalformedLine { .. }));
    assert!(store.get("en").is_some());
    assert!(store.get("fr").is_none());
}

#[test]
fn test_open_loads_directory_in_sorted_order() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "fr", resource_fixtures::FRENCH);
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    write_resource(dir.path(), "xx", resource_fixtures::MALFORMED);
    std::fs::write(dir.path().join("readme.md"), "not a language").unwrap();

    let registry = LanguageRegistry::open(&config_for(dir.path(), false));

    assert_eq!(registry.codes(), vec!["en", "fr"]);
    assert!(registry.active_code().is_none());
    assert!(!registry.is_watching());
    assert_eq!(registry.resolve("menu.start"), "menu.start");
}

#[test]
fn test_open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("assets/i18n");

    let registry = LanguageRegistry::open(&config_for(&resources, false));

    assert!(resources.is_dir());
    assert!(registry.codes().is_empty());
}

#[test]
fn test_open_without_runtime_disables_hot_reload() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);

    let registry = LanguageRegistry::open(&config_for(dir.path(), true));

    assert!(!registry.is_watching());
    assert_eq!(registry.codes(), vec!["en".to_string()]);
    registry.select("en").unwrap();
    assert_eq!(registry.resolve("menu.start"), "Start");
    assert_eq!(registry.resolve("missing"), "missing");
}

#[tokio::test]
async fn test_missing_directory_without_creation_disables_hot_reload() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let resources = dir.path().join("i18n");
    let mut config = config_for(&resources, true);
    config.selection.state_file = None;
    config.resources.create_directory = false;

    let registry = LanguageRegistry::open(&config);

    assert!(!resources.exists());
    assert!(!registry.is_watching());
    assert!(registry.codes().is_empty());
    assert_eq!(registry.resolve("menu.start"), "menu.start");
    registry.shutdown().await;
}

#[test]
fn test_select_resolve_and_fallback() {
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    write_resource(dir.path(), "fr", resource_fixtures::FRENCH);
    let registry = LanguageRegistry::open(&config_for(dir.path(), false));

    registry.select("fr").unwrap();
    assert_eq!(registry.resolve("menu.start"), "Commencer");
    // Missing in French, no cross-language fallback
    assert_eq!(registry.resolve("greeting"), "greeting");

    let err = registry.select("xx").unwrap_err();
    assert!(matches!(err, I18nError::UnknownLanguageCode(_)));
    assert_eq!(registry.active_code().as_deref(), Some("fr"));
}

#[test]
fn test_selection_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    write_resource(dir.path(), "fr", resource_fixtures::FRENCH);
    let config = config_for(dir.path(), false);

    let registry = LanguageRegistry::open(&config);
    registry.select("fr").unwrap();
    drop(registry);

    let saved = JsonSelectionFile::new(dir.path().join("state.json"));
    assert_eq!(saved.load().unwrap().as_deref(), Some("fr"));

    let reopened = LanguageRegistry::open(&config);
    assert_eq!(reopened.active_code().as_deref(), Some("fr"));
    assert_eq!(reopened.resolve("menu.quit"), "Quitter");
}

#[test]
fn test_unloadable_saved_selection_uses_default() {
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let mut config = config_for(dir.path(), false);
    config.selection.default_language = Some("en".to_string());

    let registry =
        LanguageRegistry::open_with(&config, Box::new(MemorySelection::with_code("gone")));

    assert_eq!(registry.active_code().as_deref(), Some("en"));
}

#[test]
fn test_select_index() {
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    write_resource(dir.path(), "fr", resource_fixtures::FRENCH);
    let registry = LanguageRegistry::open(&config_for(dir.path(), false));

    assert_eq!(registry.select_index(1).as_deref(), Some("fr"));
    assert_eq!(registry.active_code().as_deref(), Some("fr"));

    assert_eq!(registry.select_index(5), None);
    assert!(registry.active_code().is_none());
    assert_eq!(registry.resolve("menu.start"), "menu.start");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_hot_reload_of_active_language() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let en = write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let registry = LanguageRegistry::open(&config_for(dir.path(), true));
    assert!(registry.is_watching());

    registry.select("en").unwrap();
    assert_eq!(registry.resolve("greeting"), "Hello");

    let mut events = registry.subscribe();
    std::fs::write(&en, "greeting=Howdy\n").unwrap();

    let reloaded = wait_for(&mut events, |event| {
        matches!(event, LanguageEvent::ActiveReloaded { code } if code == "en")
    })
    .await;
    assert!(reloaded, "no reload notification for the active language");

    // Rapid writes may deliver several notifications; settle on the last.
    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while registry.resolve("greeting") != "Howdy" && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(registry.resolve("greeting"), "Howdy");
    assert_eq!(registry.active_code().as_deref(), Some("en"));

    registry.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_bad_edit_keeps_previous_record() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let en = write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    // Coalesce the truncate and write notifications of each edit
    let mut config = config_for(dir.path(), true);
    config.watch.debounce_ms = 200;
    let registry = LanguageRegistry::open(&config);
    registry.select("en").unwrap();

    std::fs::write(&en, "greeting=Broken\nno separator here\n").unwrap();
    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(registry.resolve("greeting"), "Hello");

    let mut events = registry.subscribe();
    std::fs::write(&en, "greeting=Fixed\n").unwrap();
    assert!(
        wait_for(&mut events, |event| matches!(
            event,
            LanguageEvent::ActiveReloaded { .. }
        ))
        .await
    );

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while registry.resolve("greeting") != "Fixed" && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(registry.resolve("greeting"), "Fixed");

    registry.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_new_language_file_is_hot_added() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let mut config = config_for(dir.path(), true);
    config.watch.debounce_ms = 50;
    let registry = LanguageRegistry::open(&config);
    let mut events = registry.subscribe();

    write_resource(dir.path(), "de", "menu.start=Starten\n");

    let added = wait_for(&mut events, |event| {
        matches!(event, LanguageEvent::Upserted { code, .. } if code == "de")
    })
    .await;
    assert!(added, "new language was not picked up");
    assert_eq!(registry.codes(), vec!["en", "de"]);

    registry.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_deleting_file_keeps_record() {
    let dir = tempfile::tempdir().unwrap();
    let en = write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let registry = LanguageRegistry::open(&config_for(dir.path(), true));
    registry.select("en").unwrap();

    std::fs::remove_file(&en).unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(registry.codes(), vec!["en"]);
    assert_eq!(registry.resolve("greeting"), "Hello");

    registry.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_stops_reloading() {
    let dir = tempfile::tempdir().unwrap();
    let en = write_resource(dir.path(), "en", resource_fixtures::ENGLISH);
    let registry = LanguageRegistry::open(&config_for(dir.path(), true));
    registry.select("en").unwrap();
    let store = std::sync::Arc::clone(registry.store());

    registry.shutdown().await;
    std::fs::write(&en, "greeting=After shutdown\n").unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(store.get_active().unwrap().get("greeting"), Some("Hello"));
}
