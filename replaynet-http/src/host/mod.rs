//! Host transports.
//!
//! - [`http`] - network session backed by `reqwest`

pub mod http;
