//! CLI output formatting tests.
//!
//! These tests verify that CLI output is correctly formatted for both
//! text and JSON output modes.

#[cfg(test)]
mod text_formatter_tests {
    use super::super::text::{format_size, TextFormatter};
    use replaynet_core::ServiceError;
    use replaynet_http::FixtureEntry;
    use std::path::Path;

    #[test]
    fn test_body_raw_without_pretty() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_body(br#"{"a":1}"#, false), r#"{"a":1}"#);
    }

    #[test]
    fn test_body_pretty_json() {
        let formatter = TextFormatter::new(false);
        assert_eq!(
            formatter.format_body(br#"{"a":1}"#, true),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn test_body_pretty_non_json_falls_back() {
        let formatter = TextFormatter::new(false);
        assert_eq!(formatter.format_body(b"plain text", true), "plain text");
    }

    #[test]
    fn test_error_lines() {
        let formatter = TextFormatter::new(false);
        let text = formatter.format_error(&ServiceError::Access { code: 403 });
        assert_eq!(
            text,
            "Doesn't have access\nPlease try again\naccessError (403)"
        );
    }

    #[test]
    fn test_error_colored() {
        let formatter = TextFormatter::new(true);
        let text = formatter.format_error(&ServiceError::ServerError { code: 500 });
        assert!(text.contains("\x1b[31m"));
        assert!(text.contains("Server Error"));
    }

    #[test]
    fn test_fixtures_listing() {
        let formatter = TextFormatter::new(false);
        let entries = vec![
            FixtureEntry {
                name: "mock_api_a_200".into(),
                size: 12,
            },
            FixtureEntry {
                name: "mock_b_404".into(),
                size: 2048,
            },
        ];

        let text = formatter.format_fixtures(Path::new("/tmp/fx"), &entries);
        assert_eq!(
            text,
            "Fixtures in /tmp/fx\n  mock_api_a_200  12 B\n  mock_b_404      2.0 KB\n2 fixture(s)"
        );
    }

    #[test]
    fn test_fixtures_empty() {
        let formatter = TextFormatter::new(false);
        let text = formatter.format_fixtures(Path::new("/tmp/fx"), &[]);
        assert_eq!(text, "Fixtures in /tmp/fx\n  (none)");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MB");
    }
}

#[cfg(test)]
mod json_formatter_tests {
    use super::super::json::JsonFormatter;
    use bytes::Bytes;
    use replaynet_core::ServiceError;
    use serde_json::{json, Value};

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn test_success_embeds_json_body() {
        let formatter = JsonFormatter::new(false);
        let delivery = Ok(Bytes::from_static(br#"{"id":1}"#));

        let out = parse(&formatter.format_delivery("https://x/api", Some(&delivery)).unwrap());
        assert_eq!(
            out,
            json!({"url": "https://x/api", "ok": true, "cancelled": false, "body": {"id": 1}})
        );
    }

    #[test]
    fn test_success_text_body() {
        let formatter = JsonFormatter::new(false);
        let delivery = Ok(Bytes::from_static(b"hello"));

        let out = parse(&formatter.format_delivery("u", Some(&delivery)).unwrap());
        assert_eq!(out["body"], "hello");
    }

    #[test]
    fn test_error_output() {
        let formatter = JsonFormatter::new(true);
        let delivery: Result<Bytes, ServiceError> =
            Err(ServiceError::Connectivity { code: -1000 });

        let out = parse(&formatter.format_delivery("u", Some(&delivery)).unwrap());
        assert_eq!(out["ok"], false);
        assert_eq!(out["error"]["errorType"], "connectivityIssue");
        assert_eq!(out["error"]["code"], -1000);
        assert_eq!(
            out["error"]["title"],
            "The Internet connection appears to be offline"
        );
        assert!(out.get("body").is_none());
    }

    #[test]
    fn test_cancelled_output() {
        let formatter = JsonFormatter::new(false);
        let out = parse(&formatter.format_delivery("u", None).unwrap());
        assert_eq!(out["cancelled"], true);
        assert_eq!(out["ok"], false);
    }
}
