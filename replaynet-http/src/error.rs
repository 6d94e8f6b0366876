//! Transport error types.
//!
//! A [`TransportError`] means no HTTP response could be obtained at all. It
//! never reaches a caller directly: classification turns it into
//! [`ServiceError::Connectivity`](replaynet_core::ServiceError::Connectivity)
//! carrying [`TransportError::code`].

use replaynet_core::codes;
use thiserror::Error;

/// Error raised by a [`TransportSession`](crate::session::TransportSession).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target could not be resolved (no fixture, unusable URL).
    #[error("Bad target: {0}")]
    BadTarget(String),

    /// The response content could not be read.
    #[error("Cannot decode content: {0}")]
    CannotDecode(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,

    /// The connection failed or dropped.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    /// Returns the failure code reported inside the connectivity error.
    pub fn code(&self) -> i32 {
        match self {
            Self::BadTarget(_) => codes::BAD_URL,
            Self::CannotDecode(_) => codes::CANNOT_DECODE_CONTENT_DATA,
            Self::Timeout => codes::TIMED_OUT,
            Self::ConnectionLost(_) => codes::NETWORK_CONNECTION_LOST,
            Self::Http(e) => {
                if e.is_timeout() {
                    codes::TIMED_OUT
                } else if e.is_builder() {
                    codes::BAD_URL
                } else if e.is_decode() || e.is_body() {
                    codes::CANNOT_DECODE_CONTENT_DATA
                } else {
                    codes::NETWORK_CONNECTION_LOST
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(TransportError::BadTarget("x".into()).code(), codes::BAD_URL);
        assert_eq!(
            TransportError::CannotDecode("x".into()).code(),
            codes::CANNOT_DECODE_CONTENT_DATA
        );
        assert_eq!(TransportError::Timeout.code(), codes::TIMED_OUT);
        assert_eq!(
            TransportError::ConnectionLost("reset".into()).code(),
            codes::NETWORK_CONNECTION_LOST
        );
    }
}
