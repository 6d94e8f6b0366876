//! Decoding response bytes into typed values.

use replaynet_core::{codes, DecodePolicy, ServiceError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

/// Title of the parse error returned for any decode failure.
pub const DECODE_FAILURE_TITLE: &str = "Failed to retrieve data";

/// Decodes `bytes` as JSON into `T` under `policy`.
///
/// Failures are logged with serde_json's category and position, then
/// reported as a [`ServiceError::ParseError`] with code
/// [`codes::CANNOT_DECODE_RAW_DATA`].
pub fn decode<T: DeserializeOwned>(bytes: &[u8], policy: DecodePolicy) -> Result<T, ServiceError> {
    let result = match policy {
        DecodePolicy::Json => serde_json::from_slice(bytes),
        DecodePolicy::ConvertFromSnakeCase => serde_json::from_slice::<Value>(bytes)
            .and_then(|value| serde_json::from_value(policy.apply(value))),
    };

    result.map_err(|e| {
        error!(
            target_type = std::any::type_name::<T>(),
            category = ?e.classify(),
            line = e.line(),
            column = e.column(),
            error = %e,
            "Failed to decode response"
        );
        decode_failure()
    })
}

/// The error every decode failure maps to.
pub fn decode_failure() -> ServiceError {
    ServiceError::ParseError {
        type_description: DECODE_FAILURE_TITLE.to_string(),
        code: codes::CANNOT_DECODE_RAW_DATA,
    }
}
