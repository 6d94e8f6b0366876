//! Serde serialization/deserialization tests for core types.
//!
//! The service error wire shape is shared with fixture files, so these tests
//! pin the exact JSON produced and accepted.

use serde_json::json;

use crate::{DecodePolicy, HttpMethod, ServiceError};

// ============================================================================
// ServiceError Wire Tests
// ============================================================================

#[test]
fn test_service_error_encodes_tag_and_code() {
    let json = serde_json::to_value(ServiceError::ServerError { code: 500 }).unwrap();
    assert_eq!(json, json!({"errorType": "serverError", "code": 500}));
}

#[test]
fn test_parse_error_encodes_type() {
    let error = ServiceError::ParseError {
        type_description: "Failed to retrieve data".into(),
        code: -1015,
    };
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(
        json,
        json!({"errorType": "parseError", "code": -1015, "type": "Failed to retrieve data"})
    );
}

#[test]
fn test_service_error_roundtrip_all_non_opaque_variants() {
    let errors = vec![
        ServiceError::Connectivity { code: -1005 },
        ServiceError::ServerError { code: 502 },
        ServiceError::Access { code: 403 },
        ServiceError::Unauthorized { code: 401 },
        ServiceError::ParseError {
            type_description: "User".into(),
            code: -1015,
        },
    ];

    for error in errors {
        let json = serde_json::to_string(&error).unwrap();
        let decoded: ServiceError = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, error, "Round-trip failed for {json}");
    }
}

#[test]
fn test_opaque_decodes_to_placeholder() {
    let error = ServiceError::Opaque {
        title: "Maintenance window".into(),
        description: "We will be back at noon".into(),
        code: 503,
    };
    let json = serde_json::to_string(&error).unwrap();
    let decoded: ServiceError = serde_json::from_str(&json).unwrap();

    assert_eq!(
        decoded,
        ServiceError::Opaque {
            title: "Mock".into(),
            description: "Description".into(),
            code: 503,
        }
    );
}

#[test]
fn test_parse_error_without_type_decodes_to_no_type() {
    let decoded: ServiceError =
        serde_json::from_str(r#"{"errorType":"parseError","code":12}"#).unwrap();
    assert_eq!(
        decoded,
        ServiceError::ParseError {
            type_description: "no type".into(),
            code: 12
        }
    );
}

#[test]
fn test_unknown_tag_falls_back_to_generic_parse_error() {
    let decoded: ServiceError =
        serde_json::from_str(r#"{"errorType":"legacyThing","code":999}"#).unwrap();
    assert_eq!(decoded, ServiceError::undecodable());
    assert_eq!(
        decoded.error_info().title,
        "Failed to parse payload Failed to decode service error"
    );
}

#[test]
fn test_missing_code_is_an_error() {
    let result: Result<ServiceError, _> = serde_json::from_str(r#"{"errorType":"serverError"}"#);
    assert!(result.is_err());
}

// ============================================================================
// Enum Serde Tests
// ============================================================================

#[test]
fn test_http_method_serializes_uppercase() {
    assert_eq!(serde_json::to_string(&HttpMethod::Patch).unwrap(), r#""PATCH""#);
    let method: HttpMethod = serde_json::from_str(r#""LINK""#).unwrap();
    assert_eq!(method, HttpMethod::Link);
}

#[test]
fn test_decode_policy_snake_case() {
    let policy: DecodePolicy = serde_json::from_str(r#""convert_from_snake_case""#).unwrap();
    assert_eq!(policy, DecodePolicy::ConvertFromSnakeCase);
}
