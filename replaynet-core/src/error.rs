//! Error types for `replaynet`.
//!
//! [`ServiceError`] is the closed set of failures a caller can ever observe
//! from the execution pipeline. [`CoreError`] covers the local mistakes that
//! can happen before a request is dispatched (bad URLs, unserializable
//! bodies) and failures reported by store implementations.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

// ============================================================================
// Failure Codes
// ============================================================================

/// Numeric codes carried by [`ServiceError`] variants that do not come from
/// an HTTP status.
///
/// The values follow the URL-loading error domain so that fixtures written by
/// other clients decode to the same codes.
pub mod codes {
    /// The request target could not be resolved (no fixture, malformed URL).
    pub const BAD_URL: i32 = -1000;
    /// The request timed out before a response arrived.
    pub const TIMED_OUT: i32 = -1001;
    /// The connection dropped or no HTTP response could be obtained.
    pub const NETWORK_CONNECTION_LOST: i32 = -1005;
    /// The success body could not be decoded into the requested type.
    pub const CANNOT_DECODE_RAW_DATA: i32 = -1015;
    /// The response content could not be read.
    pub const CANNOT_DECODE_CONTENT_DATA: i32 = -1016;
    /// HTTP status reserved for access errors.
    pub const FORBIDDEN: i32 = 403;
}

// ============================================================================
// Error Info
// ============================================================================

/// A (title, description) pair meant for direct display to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Short headline.
    pub title: String,
    /// Longer explanation or suggested action.
    pub description: String,
}

impl ErrorInfo {
    /// Creates a new display pair.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

// ============================================================================
// Service Error
// ============================================================================

/// Classified failure of a request execution.
///
/// Every failure surfaced by the pipeline is one of these variants; raw
/// transport errors never escape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// No HTTP response could be obtained.
    #[error("The Internet connection appears to be offline")]
    Connectivity {
        /// Transport failure code (see [`codes`]).
        code: i32,
    },

    /// The server answered with a non-2xx status other than 403.
    #[error("Server Error")]
    ServerError {
        /// HTTP status code.
        code: i32,
    },

    /// The server answered 403.
    #[error("Doesn't have access")]
    Access {
        /// HTTP status code.
        code: i32,
    },

    /// Authentication was rejected.
    #[error("unauthorized")]
    Unauthorized {
        /// HTTP status code.
        code: i32,
    },

    /// The success body could not be decoded.
    #[error("Failed to parse payload {type_description}")]
    ParseError {
        /// What failed to decode.
        type_description: String,
        /// Failure code.
        code: i32,
    },

    /// A failure described entirely by its own display pair.
    #[error("{title}")]
    Opaque {
        /// Display title.
        title: String,
        /// Display description.
        description: String,
        /// Failure code.
        code: i32,
    },
}

impl ServiceError {
    /// Title used when an opaque error is decoded from the wire.
    pub const OPAQUE_PLACEHOLDER_TITLE: &'static str = "Mock";
    /// Description used when an opaque error is decoded from the wire.
    pub const OPAQUE_PLACEHOLDER_DESCRIPTION: &'static str = "Description";

    /// Returns the numeric code carried by this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::Connectivity { code }
            | Self::ServerError { code }
            | Self::Access { code }
            | Self::Unauthorized { code }
            | Self::ParseError { code, .. }
            | Self::Opaque { code, .. } => *code,
        }
    }

    /// Returns the wire tag for this variant.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Connectivity { .. } => "connectivityIssue",
            Self::ServerError { .. } => "serverError",
            Self::Access { .. } => "accessError",
            Self::Unauthorized { .. } => "unauthorized",
            Self::ParseError { .. } => "parseError",
            Self::Opaque { .. } => "anyServerError",
        }
    }

    /// Returns the (title, description) pair to display for this error.
    pub fn error_info(&self) -> ErrorInfo {
        match self {
            Self::Connectivity { .. } => ErrorInfo::new(
                "The Internet connection appears to be offline",
                "Please try again at a later time",
            ),
            Self::ServerError { .. } => ErrorInfo::new("Server Error", "Please try again"),
            Self::ParseError {
                type_description, ..
            } => ErrorInfo::new(
                format!("Failed to parse payload {type_description}"),
                "Please try again",
            ),
            Self::Access { .. } => ErrorInfo::new("Doesn't have access", "Please try again"),
            Self::Unauthorized { .. } => ErrorInfo::new("unauthorized", "auth failure"),
            Self::Opaque {
                title, description, ..
            } => ErrorInfo::new(title.clone(), description.clone()),
        }
    }

    /// Rebuilds an error from its wire parts.
    ///
    /// Returns `None` for an unknown tag. Opaque errors never carry their
    /// payload on the wire and come back as the fixed placeholder.
    pub fn from_wire_parts(tag: &str, code: i32, type_description: Option<String>) -> Option<Self> {
        let error = match tag {
            "connectivityIssue" => Self::Connectivity { code },
            "serverError" => Self::ServerError { code },
            "accessError" => Self::Access { code },
            "unauthorized" => Self::Unauthorized { code },
            "parseError" => Self::ParseError {
                type_description: type_description.unwrap_or_else(|| "no type".to_string()),
                code,
            },
            "anyServerError" => Self::Opaque {
                title: Self::OPAQUE_PLACEHOLDER_TITLE.to_string(),
                description: Self::OPAQUE_PLACEHOLDER_DESCRIPTION.to_string(),
                code,
            },
            _ => return None,
        };
        Some(error)
    }

    /// Fallback for payloads whose tag is not recognized.
    pub fn undecodable() -> Self {
        Self::ParseError {
            type_description: "Failed to decode service error".to_string(),
            code: 200,
        }
    }

    /// Returns true if this error came from the transport rather than a status.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }
}

/// Wire shape: `{"errorType": <tag>, "code": <int>, "type"?: <string>}`.
#[derive(Debug, Serialize, Deserialize)]
struct WireError {
    #[serde(rename = "errorType")]
    error_type: String,
    code: i32,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    type_description: Option<String>,
}

impl Serialize for ServiceError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let type_description = match self {
            Self::ParseError {
                type_description, ..
            } => Some(type_description.clone()),
            _ => None,
        };
        WireError {
            error_type: self.tag().to_string(),
            code: self.code(),
            type_description,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ServiceError {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireError::deserialize(deserializer)?;
        Ok(
            Self::from_wire_parts(&wire.error_type, wire.code, wire.type_description)
                .unwrap_or_else(Self::undecodable),
        )
    }
}

// ============================================================================
// Core Error
// ============================================================================

/// Error type for request construction and store access.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value was rejected.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing store failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

// ============================================================================
// Tests
// ============================================================================
