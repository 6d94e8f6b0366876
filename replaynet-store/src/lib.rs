// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `replaynet` Store
//!
//! Persistent storage for `replaynet`.
//!
//! This crate provides:
//!
//! - **`JsonFileStore`**: [`KeyValueStore`](replaynet_core::KeyValueStore)
//!   backed by a JSON file, with per-key watch channels
//! - **Persistence**: File I/O helpers for JSON data and default paths
//!
//! ## Usage
//!
//! ```ignore
//! use replaynet_core::KeyValueStore;
//! use replaynet_store::JsonFileStore;
//!
//! let store = JsonFileStore::open_default().await?;
//!
//! // Subscribe to changes
//! let mut rx = store.subscribe("core-token-authentication-key");
//!
//! store.set("core-token-authentication-key", Some("abc".into())).await?;
//! rx.changed().await?;
//! ```

pub mod error;
pub mod kv_store;
pub mod persistence;

pub use error::StoreError;
pub use kv_store::JsonFileStore;
pub use persistence::{
    default_config_dir, default_config_path, default_store_path, load_json, load_json_or_default,
    save_json,
};
#[cfg(test)]
mod persistence_tests;
