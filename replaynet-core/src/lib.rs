// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `replaynet` Core
//!
//! Core types, models, and traits shared by all `replaynet` crates.
//!
//! This crate provides the foundational abstractions used across the
//! workspace, including:
//!
//! - The closed error taxonomy surfaced to callers ([`ServiceError`])
//! - Request descriptors and the outgoing request model
//! - The key-value store collaborator trait
//!
//! ## Key Types
//!
//! ### Errors
//! - [`ServiceError`] - Classified failure, serializable to the fixture wire shape
//! - [`ErrorInfo`] - Display pair (title, description) for a failure
//! - [`CoreError`] - Errors raised while building requests or using a store
//!
//! ### Requests
//! - [`Endpoint`] - Request descriptor builder
//! - [`HttpMethod`] - Supported request methods
//! - [`DecodePolicy`] - How a success body is decoded
//! - [`HttpRequest`] - The concrete request threaded through interceptors
//!
//! ### Collaborators
//! - [`KeyValueStore`] - Persistent key-value storage with change notification

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::{codes, CoreError, ErrorInfo, ServiceError};

// Re-export all model types
pub use models::{DecodePolicy, Endpoint, HttpMethod, HttpRequest};

// Re-export traits
pub use traits::{KeyValueStore, KeyValueStoreExt};
