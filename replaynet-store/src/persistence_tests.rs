//! Persistence round-trip and edge case tests.
//!
//! Tests file I/O operations, JSON persistence, and store reload.

use std::collections::BTreeMap;
use std::path::PathBuf;

use replaynet_core::KeyValueStore;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::kv_store::JsonFileStore;
use crate::persistence::{load_json, load_json_or_default, save_json};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.json");

    let data = json!({"max_retries": 3, "fixture_dir": "/tmp/fixtures"});

    save_json(&file_path, &data).await.unwrap();
    let loaded: Value = load_json(&file_path).await.unwrap();

    assert_eq!(loaded, data);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir.path().join("deeply").join("nested").join("test.json");

    let result = save_json(&nested_path, &json!({"key": "value"})).await;
    assert!(result.is_ok());
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/store.json");

    let result: Result<Value, _> = load_json(&file_path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_or_default_on_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("corrupt.json");
    tokio::fs::write(&file_path, "{not json").await.unwrap();

    let loaded: BTreeMap<String, Value> = load_json_or_default(&file_path).await;
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_atomic_write() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("atomic.json");

    save_json(&file_path, &json!({})).await.unwrap();

    let temp_path = file_path.with_extension("json.tmp");
    assert!(!temp_path.exists());
    assert!(file_path.exists());
}

// ============================================================================
// Store Reload Tests
// ============================================================================

#[tokio::test]
async fn test_store_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("store.json");

    {
        let store = JsonFileStore::open(file_path.clone()).await.unwrap();
        store.set("token", Some(json!("persisted"))).await.unwrap();
        store.set("other", Some(json!({"n": 1}))).await.unwrap();
        store.set("other", None).await.unwrap();
    }

    let reopened = JsonFileStore::open(file_path).await.unwrap();
    assert_eq!(reopened.get("token"), Some(json!("persisted")));
    assert!(reopened.get("other").is_none());
}

#[tokio::test]
async fn test_store_opens_corrupt_file_empty() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("store.json");
    tokio::fs::write(&file_path, "[1, 2").await.unwrap();

    let store = JsonFileStore::open(file_path.clone()).await.unwrap();
    assert!(store.keys().is_empty());

    store.set("k", Some(json!(true))).await.unwrap();
    let on_disk: BTreeMap<String, Value> = load_json(&file_path).await.unwrap();
    assert_eq!(on_disk.get("k"), Some(&json!(true)));
}

#[tokio::test]
async fn test_in_memory_store_writes_nothing() {
    let store = JsonFileStore::in_memory();
    store.set("k", Some(json!(1))).await.unwrap();
    assert!(store.path().is_none());
}
