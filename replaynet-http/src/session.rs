//! Transport session trait and raw response type.
//!
//! A session is "send a request, get bytes and a status back". The pipeline
//! dispatches through whichever session the interceptor chain left in the
//! delivery context.

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use replaynet_core::HttpRequest;

use crate::error::TransportError;

// ============================================================================
// Raw Response
// ============================================================================

/// An unclassified response: any status, any body.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Status code. Replayed fixtures may carry non-HTTP codes.
    pub status: i32,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl RawResponse {
    /// Creates a response with no headers.
    pub fn new(status: i32, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Creates an empty 200 response.
    pub fn empty_ok() -> Self {
        Self::new(200, Bytes::new())
    }

    /// Returns true if the status is in `[200, 299]`.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

// ============================================================================
// Transport Session Trait
// ============================================================================

/// Something that can dispatch an [`HttpRequest`].
///
/// ## Implementing a Session
///
/// ```ignore
/// struct CannedSession;
///
/// #[async_trait]
/// impl TransportSession for CannedSession {
///     fn name(&self) -> &str {
///         "canned"
///     }
///
///     async fn send(&self, _request: &HttpRequest) -> Result<RawResponse, TransportError> {
///         Ok(RawResponse::new(200, r#"{"id":1}"#))
///     }
/// }
/// ```
#[async_trait]
pub trait TransportSession: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "session"
    }

    /// Sends `request` and returns the raw response.
    ///
    /// Returns `Err` only when no response could be obtained; non-2xx
    /// statuses are `Ok` and left to classification.
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_range() {
        assert!(RawResponse::new(200, "").is_success());
        assert!(RawResponse::new(299, "").is_success());
        assert!(!RawResponse::new(199, "").is_success());
        assert!(!RawResponse::new(300, "").is_success());
        assert!(!RawResponse::new(-1005, "").is_success());
    }
}
