use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!(
        "interview_analytics_store_test_{}_{}",
        std::process::id(),
        id
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();
    assert_eq!(store.get("a").unwrap(), None);
    store.set("a", "1").unwrap();
    store.set("a", "2").unwrap();
    assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    assert_eq!(store.get("b").unwrap(), None);
}

#[test]
fn test_file_store_missing_file_is_empty() {
    let dir = make_temp_dir();
    let store = FileStore::new(dir.join("missing.json"));
    assert_eq!(store.get("anything").unwrap(), None);
}

#[test]
fn test_file_store_persists_across_instances() {
    let dir = make_temp_dir();
    let path = dir.join("nested").join("session.json");
    let mut store = FileStore::new(&path);
    store.set("analytics:org:1", "{\"activeTab\":\"overview\"}").unwrap();
    store.set("analytics:scope:jobAd:7", "{\"activeTab\":\"steps\"}").unwrap();

    let reopened = FileStore::new(&path);
    assert_eq!(
        reopened.get("analytics:scope:jobAd:7").unwrap().as_deref(),
        Some("{\"activeTab\":\"steps\"}")
    );
    assert_eq!(
        reopened.get("analytics:org:1").unwrap().as_deref(),
        Some("{\"activeTab\":\"overview\"}")
    );
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_file_store_corrupt_file() {
    let dir = make_temp_dir();
    let path = dir.join("session.json");
    fs::write(&path, "not json").unwrap();

    let mut store = FileStore::new(&path);
    assert!(store.get("k").is_err());

    store.set("k", "v").unwrap();
    assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_file_store_unreadable_file_is_not_overwritten() {
    let dir = make_temp_dir();
    // A directory where the session file should be cannot be read as text.
    let path = dir.join("session.json");
    fs::create_dir_all(path.join("inner")).unwrap();

    let mut store = FileStore::new(&path);
    assert!(matches!(store.set("k", "v"), Err(StoreError::Io(_))));
    assert!(path.join("inner").is_dir());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn test_file_store_empty_file() {
    let dir = make_temp_dir();
    let path = dir.join("session.json");
    fs::write(&path, "  \n").unwrap();
    let store = FileStore::new(&path);
    assert_eq!(store.get("k").unwrap(), None);
    assert_eq!(store.path(), path.as_path());
}
