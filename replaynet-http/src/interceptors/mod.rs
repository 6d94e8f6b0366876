//! Built-in interceptors.
//!
//! - [`TokenInterceptor`] - adds a bearer authorization header from a store
//! - [`ResponseRecorder`] - writes outcomes to fixture files
//! - [`ReplayReader`] - routes dispatch through [`MockTransport`](crate::mock::MockTransport)

pub mod recorder;
pub mod replay;
pub mod token;

pub use recorder::ResponseRecorder;
pub use replay::ReplayReader;
pub use token::{TokenInterceptor, TOKEN_KEY};
