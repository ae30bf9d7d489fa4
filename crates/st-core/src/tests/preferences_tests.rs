use std::fs;

use crate::{FilePreferenceStore, MemoryPreferenceStore, PreferenceRecord, PreferenceStore};

fn record(source: &str, target: &str) -> PreferenceRecord {
    PreferenceRecord {
        source_language: source.into(),
        target_language: target.into(),
    }
}

#[test]
fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FilePreferenceStore::new(tmp.path().join("prefs.json"));

    let loaded = store.load();

    assert_eq!(loaded.source_language, "en");
    assert_eq!(loaded.target_language, "zh-TW");
}

#[test]
fn save_is_visible_to_next_load() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FilePreferenceStore::new(tmp.path().join("nested").join("prefs.json"));

    store.save(&record("ja", "ko")).unwrap();

    assert_eq!(store.load(), record("ja", "ko"));
    // a second handle on the same file sees it too
    let reopened = FilePreferenceStore::new(store.path());
    assert_eq!(reopened.load(), record("ja", "ko"));
}

#[test]
fn saving_what_was_loaded_changes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = FilePreferenceStore::new(&path);
    store.save(&record("auto", "de")).unwrap();
    let before = fs::read_to_string(&path).unwrap();

    store.save(&store.load()).unwrap();

    assert_eq!(store.load(), record("auto", "de"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn file_uses_namespaced_keys() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = FilePreferenceStore::new(&path);

    store.save(&record("fr", "it")).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["source_lang_code"], "fr");
    assert_eq!(raw["target_lang_code"], "it");
}

#[test]
fn partial_or_corrupt_file_falls_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("prefs.json");
    let store = FilePreferenceStore::new(&path);

    fs::write(&path, r#"{"target_lang_code":"ja"}"#).unwrap();
    assert_eq!(store.load(), record("en", "ja"));

    fs::write(&path, "not json").unwrap();
    assert_eq!(store.load(), PreferenceRecord::default());
}

#[test]
fn memory_store_round_trips() {
    let store = MemoryPreferenceStore::new();
    assert_eq!(store.load(), PreferenceRecord::default());

    store.save(&record("es", "pt")).unwrap();
    store.save(&store.load()).unwrap();

    assert_eq!(store.load(), record("es", "pt"));
}
