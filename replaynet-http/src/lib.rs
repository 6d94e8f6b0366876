// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `replaynet` HTTP
//!
//! Request execution for `replaynet`: an interceptor chain around a
//! pluggable transport session, with retry, error classification, and
//! fixture-based record and replay.
//!
//! ## Pipeline
//!
//! - [`pipeline::ExecutionPipeline`] - folds interceptors, dispatches,
//!   classifies, retries and notifies
//! - [`handle::ExecutionHandle`] - cancellable handle to a running execution
//! - [`interceptor::Interceptor`] - pre-dispatch and post-dispatch hooks
//!
//! ## Transports
//!
//! - [`host::http::ReqwestSession`] - real network
//! - [`mock::MockTransport`] - answers from fixture files
//!
//! ## Built-in Interceptors
//!
//! - [`interceptors::TokenInterceptor`] - bearer authorization from a store
//! - [`interceptors::ResponseRecorder`] - records outcomes as fixtures
//! - [`interceptors::ReplayReader`] - routes dispatch to the mock transport
//!
//! ## Example
//!
//! ```ignore
//! use replaynet_http::{ExecutionPipeline, ReqwestSession, ResponseRecorder};
//!
//! let pipeline = ExecutionPipeline::new(Arc::new(ReqwestSession::new()?));
//! pipeline.register(ResponseRecorder::new("/tmp/fixtures"));
//!
//! let handle = pipeline.execute(HttpRequest::parse_get("https://example.com/api/users")?);
//! match handle.await {
//!     Some(Ok(bytes)) => println!("{} bytes", bytes.len()),
//!     Some(Err(error)) => println!("{}", error.error_info().title),
//!     None => println!("cancelled"),
//! }
//! ```

pub mod classify;
pub mod decode;
pub mod error;
pub mod fixture;
pub mod handle;
pub mod host;
pub mod interceptor;
pub mod interceptors;
pub mod mock;
pub mod pipeline;
pub mod retry;
pub mod session;
pub mod settings;

// Errors
pub use error::TransportError;

// Transports
pub use host::http::ReqwestSession;
pub use mock::MockTransport;
pub use session::{RawResponse, TransportSession};

// Fixtures
pub use fixture::{
    annotate_status, default_fixture_dir, fixture_name, status_of, FixtureDir, FixtureEntry,
    FixtureKey, COMPLETION_HEADER, DEFAULT_STATUS, STATUS_HEADER,
};

// Pipeline
pub use classify::{classify, classify_status};
pub use decode::{decode, decode_failure};
pub use handle::{Delivery, ExecutionHandle};
pub use interceptor::{DeliveryContext, Interceptor};
pub use interceptors::{ReplayReader, ResponseRecorder, TokenInterceptor, TOKEN_KEY};
pub use pipeline::ExecutionPipeline;
pub use retry::RetryPolicy;
pub use settings::{PipelineSettings, TransportMode, DEFAULT_USER_AGENT};
