//! Maps raw transport results into the service error taxonomy.

use bytes::Bytes;
use replaynet_core::{codes, ServiceError};

use crate::error::TransportError;
use crate::session::RawResponse;

/// Classifies a status code. `None` means success.
///
/// 403 is an access failure; anything else outside `[200, 299]` is a server
/// error carrying the status.
pub fn classify_status(status: i32) -> Option<ServiceError> {
    match status {
        200..=299 => None,
        codes::FORBIDDEN => Some(ServiceError::Access { code: status }),
        _ => Some(ServiceError::ServerError { code: status }),
    }
}

/// Classifies one dispatch attempt.
pub fn classify(result: Result<RawResponse, TransportError>) -> Result<Bytes, ServiceError> {
    match result {
        Ok(response) => match classify_status(response.status) {
            None => Ok(response.body),
            Some(error) => Err(error),
        },
        Err(e) => Err(ServiceError::Connectivity { code: e.code() }),
    }
}
