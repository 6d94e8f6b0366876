//! Request models for `replaynet`.
//!
//! ## Submodules
//!
//! - [`endpoint`] - Request descriptor builder (Endpoint, HttpMethod, DecodePolicy)
//! - [`request`] - The concrete request passed through interceptors (HttpRequest)

pub mod endpoint;
pub mod request;

// Re-export everything at the models level
pub use endpoint::{DecodePolicy, Endpoint, HttpMethod};
pub use request::HttpRequest;
#[cfg(test)]
mod serde_tests;
