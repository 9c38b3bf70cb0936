//! Tests for the metadata stores.

use super::*;
use crate::error::TermLockError;
use tempfile::TempDir;

/// Behavior every store must share.
fn exercise_store(store: &dyn MetaStore) {
    let term = EntityId(12);

    assert_eq!(store.get_meta(term, "_term_lock").unwrap(), None);

    store.set_meta(term, "_term_lock", "1700000000:42").unwrap();
    store.set_meta(term, "color", "red").unwrap();
    assert_eq!(
        store.get_meta(term, "_term_lock").unwrap().as_deref(),
        Some("1700000000:42")
    );

    // Overwrite wins
    store.set_meta(term, "_term_lock", "1700000100:7").unwrap();
    assert_eq!(
        store.get_meta(term, "_term_lock").unwrap().as_deref(),
        Some("1700000100:7")
    );

    // Empty values are stored as-is; interpreting them is the adapter's job
    store.set_meta(term, "_term_lock", "").unwrap();
    assert_eq!(store.get_meta(term, "_term_lock").unwrap().as_deref(), Some(""));

    store.delete_meta(term, "_term_lock").unwrap();
    assert_eq!(store.get_meta(term, "_term_lock").unwrap(), None);
    assert_eq!(store.get_meta(term, "color").unwrap().as_deref(), Some("red"));

    // Deleting a missing key is fine
    store.delete_meta(EntityId(99), "_term_lock").unwrap();

    store.set_meta(EntityId(3), "_term_lock", "1:1").unwrap();
    assert_eq!(store.entity_ids().unwrap(), vec![EntityId(3), term]);

    store.purge_entity(term).unwrap();
    assert_eq!(store.get_meta(term, "color").unwrap(), None);
    assert_eq!(store.entity_ids().unwrap(), vec![EntityId(3)]);
}

#[test]
fn test_memory_store_contract() {
    exercise_store(&MemoryMetaStore::new());
}

#[test]
fn test_file_store_contract() {
    let temp_dir = TempDir::new().unwrap();
    exercise_store(&FileMetaStore::new(temp_dir.path().join("meta.json")));
}

#[test]
fn test_file_store_missing_file_reads_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileMetaStore::new(temp_dir.path().join("meta.json"));

    assert_eq!(store.get_meta(EntityId(1), "_term_lock").unwrap(), None);
    assert!(store.entity_ids().unwrap().is_empty());
    assert!(!store.path().exists());
}

#[test]
fn test_file_store_sees_writes_from_another_handle() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("meta.json");
    let writer = FileMetaStore::new(&path);
    let reader = FileMetaStore::new(&path);

    assert_eq!(reader.get_meta(EntityId(5), "_term_lock").unwrap(), None);
    writer.set_meta(EntityId(5), "_term_lock", "10:2").unwrap();
    assert_eq!(
        reader.get_meta(EntityId(5), "_term_lock").unwrap().as_deref(),
        Some("10:2")
    );
}

#[test]
fn test_file_store_document_layout() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("meta.json");
    let store = FileMetaStore::new(&path);
    store.set_meta(EntityId(12), "_term_lock", "1700000000:42").unwrap();

    let doc: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(doc["entities"]["12"]["_term_lock"], "1700000000:42");
}

#[test]
fn test_file_store_corrupt_document_is_store_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("meta.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = FileMetaStore::new(&path)
        .get_meta(EntityId(1), "_term_lock")
        .unwrap_err();
    assert!(matches!(err, TermLockError::StoreError(_)));
}
