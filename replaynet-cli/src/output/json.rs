//! JSON output formatting.

use anyhow::Result;
use bytes::Bytes;
use replaynet_core::ServiceError;
use replaynet_http::FixtureEntry;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a fetch.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutput {
    pub url: String,
    pub ok: bool,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorOutput>,
}

/// A service error with its display pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub error_type: &'static str,
    pub code: i32,
    pub title: String,
    pub description: String,
}

impl From<&ServiceError> for ErrorOutput {
    fn from(error: &ServiceError) -> Self {
        let info = error.error_info();
        Self {
            error_type: error.tag(),
            code: error.code(),
            title: info.title,
            description: info.description,
        }
    }
}

/// A listed fixture.
#[derive(Debug, Serialize)]
pub struct FixtureOutput<'a> {
    pub name: &'a str,
    pub size: u64,
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats a fetch outcome. JSON bodies are embedded as values, other
    /// bodies as strings.
    pub fn format_delivery(
        &self,
        url: &str,
        delivery: Option<&Result<Bytes, ServiceError>>,
    ) -> Result<String> {
        let output = match delivery {
            Some(Ok(body)) => FetchOutput {
                url: url.to_string(),
                ok: true,
                cancelled: false,
                body: Some(body_value(body)),
                error: None,
            },
            Some(Err(error)) => FetchOutput {
                url: url.to_string(),
                ok: false,
                cancelled: false,
                body: None,
                error: Some(error.into()),
            },
            None => FetchOutput {
                url: url.to_string(),
                ok: false,
                cancelled: true,
                body: None,
                error: None,
            },
        };
        self.format(&output)
    }

    /// Formats a fixture listing.
    pub fn format_fixtures(&self, entries: &[FixtureEntry]) -> Result<String> {
        let outputs: Vec<FixtureOutput<'_>> = entries
            .iter()
            .map(|e| FixtureOutput {
                name: &e.name,
                size: e.size,
            })
            .collect();
        self.format(&outputs)
    }
}

fn body_value(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
