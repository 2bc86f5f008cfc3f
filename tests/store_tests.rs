//! Tests for the file-backed preference store.

use chatdock::prefs::{JsonPrefStore, PreferenceStore, StoreError, Theme};
use serde_json::json;
use std::fs;
use std::path::PathBuf;

/// Fresh store path per test so runs cannot interfere with each other.
fn temp_store(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chatdock-test-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir.join("prefs.json")
}

#[test]
fn missing_file_defaults_to_light_theme() {
    let path = temp_store("missing");
    let store = JsonPrefStore::open_at(path).unwrap();
    assert_eq!(store.theme(), Theme::Light);
    assert!(store.user_data().is_none());
}

#[test]
fn theme_write_survives_reopen() {
    let path = temp_store("reopen");
    let mut store = JsonPrefStore::open_at(path.clone()).unwrap();
    store.set_theme(Theme::Dark);
    drop(store);

    let store = JsonPrefStore::open_at(path).unwrap();
    assert_eq!(store.theme(), Theme::Dark);
}

#[test]
fn toggling_twice_restores_the_original_theme() {
    let path = temp_store("toggle");
    let mut store = JsonPrefStore::open_at(path).unwrap();
    let original = store.theme();
    assert_eq!(store.toggle_theme(), Theme::Dark);
    assert_eq!(store.toggle_theme(), original);
}

#[test]
fn user_data_blob_roundtrips_verbatim() {
    let path = temp_store("userdata");
    let blob = json!({ "conversations": [{ "id": 1, "title": "notes" }], "pinned": true });

    let mut store = JsonPrefStore::open_at(path.clone()).unwrap();
    store.set_user_data(blob.clone());
    drop(store);

    let store = JsonPrefStore::open_at(path).unwrap();
    assert_eq!(store.user_data(), Some(&blob));
}

#[test]
fn writes_rewrite_the_whole_record() {
    let path = temp_store("wholesale");
    let mut store = JsonPrefStore::open_at(path.clone()).unwrap();
    store.set_user_data(json!({ "k": "v" }));
    store.set_theme(Theme::Dark);

    // The last write must have carried both keys.
    let on_disk: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["theme"], "dark");
    assert_eq!(on_disk["userData"]["k"], "v");
}

#[test]
fn malformed_file_fails_initialization() {
    let path = temp_store("malformed");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "not json at all {").unwrap();

    match JsonPrefStore::open_at(path) {
        Err(StoreError::Parse(_)) => {}
        other => panic!("expected a parse error, got {:?}", other.err()),
    }
}
