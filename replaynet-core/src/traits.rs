//! Trait definitions for `replaynet` collaborators.
//!
//! The pipeline never reaches for global state; anything persistent is
//! injected through these traits.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::watch;

use crate::error::CoreError;

/// Persistent key-value storage with per-key change notification.
///
/// Implementors must:
/// - Return the current value from [`get`](Self::get) without blocking on I/O
/// - Push every distinct new value to all receivers handed out by
///   [`subscribe`](Self::subscribe) for that key
/// - Not notify when a key is set to the value it already holds
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the current value for `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Sets (or clears, with `None`) the value for `key` and persists it.
    async fn set(&self, key: &str, value: Option<Value>) -> Result<(), CoreError>;

    /// Subscribes to changes of `key`.
    ///
    /// The receiver starts out holding the current value.
    fn subscribe(&self, key: &str) -> watch::Receiver<Option<Value>>;
}

/// Typed helpers over any [`KeyValueStore`].
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Returns the value for `key` decoded as `T`, or `None` if absent or of
    /// another shape.
    fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|v| serde_json::from_value(v).ok())
    }

    /// Encodes `value` and stores it under `key`.
    async fn set_as<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let value = serde_json::to_value(value)?;
        self.set(key, Some(value)).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
