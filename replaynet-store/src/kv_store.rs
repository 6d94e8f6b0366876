//! JSON-file backed key-value store.
//!
//! Every key owns a `watch` channel whose current value *is* the stored
//! value, so reads never touch the disk and subscribers always see the most
//! recent write.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use replaynet_core::{CoreError, KeyValueStore};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::persistence::{default_store_path, load_json, save_json};

/// Persistent key-value store with per-key change notifications.
pub struct JsonFileStore {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, watch::Sender<Option<Value>>>>,
    /// Serializes writes so the file and the channels change together.
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonFileStore {
    /// Creates a store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Opens the store at the default path.
    ///
    /// # Errors
    ///
    /// Returns error if an existing store file cannot be read.
    pub async fn open_default() -> Result<Self, StoreError> {
        Self::open(default_store_path()).await
    }

    /// Opens the store at `path`, loading existing entries.
    ///
    /// A missing file yields an empty store. A corrupt file is logged and
    /// replaced on the next write.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read.
    pub async fn open(path: PathBuf) -> Result<Self, StoreError> {
        let entries: BTreeMap<String, Value> = if path.exists() {
            info!(path = %path.display(), "Loading store");
            match load_json(&path).await {
                Ok(entries) => entries,
                Err(StoreError::Io(e)) => return Err(StoreError::Io(e)),
                Err(e) => {
                    warn!(error = %e, "Failed to parse store, starting empty");
                    BTreeMap::new()
                }
            }
        } else {
            debug!(path = %path.display(), "Store file not found, starting empty");
            BTreeMap::new()
        };

        let entries = entries
            .into_iter()
            .map(|(key, value)| (key, watch::channel(Some(value)).0))
            .collect();

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
            write_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Returns the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Returns all keys that currently hold a value.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .lock_entries()
            .iter()
            .filter(|(_, tx)| tx.borrow().is_some())
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, watch::Sender<Option<Value>>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn snapshot(&self) -> BTreeMap<String, Value> {
        self.lock_entries()
            .iter()
            .filter_map(|(k, tx)| tx.borrow().clone().map(|v| (k.clone(), v)))
            .collect()
    }

    /// Writes the current snapshot with `key` replaced by `value`.
    async fn persist_with(&self, key: &str, value: Option<&Value>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let mut snapshot = self.snapshot();
        match value {
            Some(value) => snapshot.insert(key.to_string(), value.clone()),
            None => snapshot.remove(key),
        };
        save_json(path, &snapshot).await
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.lock_entries()
            .get(key)
            .and_then(|tx| tx.borrow().clone())
    }

    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), CoreError> {
        let _guard = self.write_lock.lock().await;

        if self.get(key) == value {
            debug!(key = key, "Value unchanged, not notifying");
            return Ok(());
        }

        // Subscribers only ever observe values that reached the file.
        self.persist_with(key, value.as_ref()).await?;

        let mut entries = self.lock_entries();
        match entries.get(key) {
            Some(tx) => {
                tx.send_replace(value);
            }
            None => {
                entries.insert(key.to_string(), watch::channel(value).0);
            }
        }
        debug!(key = key, "Value updated");
        Ok(())
    }

    fn subscribe(&self, key: &str) -> watch::Receiver<Option<Value>> {
        self.lock_entries()
            .entry(key.to_string())
            .or_insert_with(|| watch::channel(None).0)
            .subscribe()
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use replaynet_core::KeyValueStoreExt;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_returns_last_set() {
        let store = JsonFileStore::in_memory();
        assert!(store.get("token").is_none());

        store.set("token", Some(json!("abc"))).await.unwrap();
        assert_eq!(store.get("token"), Some(json!("abc")));

        store.set("token", None).await.unwrap();
        assert!(store.get("token").is_none());
    }

    #[tokio::test]
    async fn test_subscribe_sees_current_and_new_values() {
        let store = JsonFileStore::in_memory();
        store.set("token", Some(json!("first"))).await.unwrap();

        let mut rx = store.subscribe("token");
        assert_eq!(*rx.borrow(), Some(json!("first")));

        store.set("token", Some(json!("second"))).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Some(json!("second")));
    }

    #[tokio::test]
    async fn test_subscribe_before_first_set() {
        let store = JsonFileStore::in_memory();
        let mut rx = store.subscribe("late");
        assert!(rx.borrow().is_none());

        store.set("late", Some(json!(1))).await.unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(json!(1)));
    }

    #[tokio::test]
    async fn test_duplicate_value_does_not_notify() {
        let store = JsonFileStore::in_memory();
        store.set("k", Some(json!(5))).await.unwrap();

        let mut rx = store.subscribe("k");
        let _ = rx.borrow_and_update();

        store.set("k", Some(json!(5))).await.unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_typed_helpers() {
        let store = JsonFileStore::in_memory();
        store.set_as("count", &42_i64).await.unwrap();
        assert_eq!(store.get_as::<i64>("count"), Some(42));
        assert_eq!(store.get_as::<String>("count"), None);
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_value() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("state");
        let store = JsonFileStore::open(dir.join("store.json")).await.unwrap();
        store.set("token", Some(json!("old"))).await.unwrap();
        let mut rx = store.subscribe("token");
        let _ = rx.borrow_and_update();

        // Replace the directory with a plain file so the next save fails.
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        let result = store.set("token", Some(json!("new"))).await;
        assert!(result.is_err());
        assert_eq!(store.get("token"), Some(json!("old")));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(*rx.borrow(), Some(json!("old")));
    }

    #[tokio::test]
    async fn test_keys_lists_only_present_values() {
        let store = JsonFileStore::in_memory();
        store.set("b", Some(json!(1))).await.unwrap();
        store.set("a", Some(json!(2))).await.unwrap();
        let _rx = store.subscribe("c");

        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}
