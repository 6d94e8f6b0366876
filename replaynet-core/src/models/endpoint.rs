//! Request descriptor builder.
//!
//! An [`Endpoint`] collects the URL, query items, body, method and decode
//! policy of a call and resolves into an [`HttpRequest`] at dispatch time.

use std::fmt;

use bytes::Bytes;
use http::header::{self, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::CoreError;
use crate::models::request::HttpRequest;

// ============================================================================
// HTTP Method
// ============================================================================

/// Methods an [`Endpoint`] can be sent with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET
    #[default]
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// COPY (`WebDAV`)
    Copy,
    /// LINK
    Link,
}

impl HttpMethod {
    /// Returns the method token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Copy => "COPY",
            Self::Link => "LINK",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            // Extension tokens; both are valid so parsing cannot fail.
            HttpMethod::Copy | HttpMethod::Link => {
                Method::from_bytes(method.as_str().as_bytes()).unwrap_or_default()
            }
        }
    }
}

// ============================================================================
// Decode Policy
// ============================================================================

/// How a success body is turned into a typed value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Decode the JSON body as-is.
    #[default]
    Json,
    /// Rewrite `snake_case` object keys to `camelCase` before decoding.
    ConvertFromSnakeCase,
}

impl DecodePolicy {
    /// Applies the policy to a parsed JSON document.
    pub fn apply(&self, value: Value) -> Value {
        match self {
            Self::Json => value,
            Self::ConvertFromSnakeCase => convert_keys(value),
        }
    }
}

fn convert_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (snake_to_camel(&k), convert_keys(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(convert_keys).collect()),
        other => other,
    }
}

/// Converts `snake_case` to `camelCase`, keeping leading and trailing underscores.
fn snake_to_camel(key: &str) -> String {
    let trimmed = key.trim_matches('_');
    if trimmed.is_empty() || !trimmed.contains('_') {
        return key.to_string();
    }
    let leading = key.len() - key.trim_start_matches('_').len();
    let trailing = key.len() - key.trim_end_matches('_').len();

    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..leading]);
    for (i, word) in trimmed.split('_').filter(|w| !w.is_empty()).enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(chars.as_str());
            }
        }
    }
    out.push_str(&key[key.len() - trailing..]);
    out
}

// ============================================================================
// Endpoint
// ============================================================================

/// Immutable-once-sent description of a request.
///
/// ```ignore
/// let endpoint = Endpoint::parse("https://the-trivia-api.com/api/questions")?
///     .query("limit", "5")
///     .method(HttpMethod::Get)
///     .decode_using(DecodePolicy::ConvertFromSnakeCase);
/// let request = endpoint.to_request();
/// ```
#[derive(Debug, Clone)]
pub struct Endpoint {
    url: Url,
    queries: Vec<(String, String)>,
    body: Option<Bytes>,
    method: HttpMethod,
    headers: HeaderMap,
    decode_policy: Option<DecodePolicy>,
}

impl Endpoint {
    /// Creates a GET endpoint for `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            queries: Vec::new(),
            body: None,
            method: HttpMethod::Get,
            headers: HeaderMap::new(),
            decode_policy: None,
        }
    }

    /// Parses `url` and creates a GET endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] if the URL does not parse.
    pub fn parse(url: &str) -> Result<Self, CoreError> {
        let url = Url::parse(url).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;
        Ok(Self::new(url))
    }

    /// Base URL, without the appended query items.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Appends a query item.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.queries.push((name.into(), value.into()));
        self
    }

    /// Sets a raw body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body and sets `content-type`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] if `value` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, CoreError> {
        let body = serde_json::to_vec(value)?;
        self.body = Some(Bytes::from(body));
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets the decode policy.
    #[must_use]
    pub fn decode_using(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = Some(policy);
        self
    }

    /// Returns the decode policy, defaulting to plain JSON.
    pub fn decode_policy(&self) -> DecodePolicy {
        self.decode_policy.unwrap_or_default()
    }

    /// Returns the configured method.
    pub fn http_method(&self) -> HttpMethod {
        self.method
    }

    /// Resolves the endpoint into a concrete request.
    pub fn to_request(&self) -> HttpRequest {
        let mut url = self.url.clone();
        if !self.queries.is_empty() {
            url.query_pairs_mut().extend_pairs(self.queries.iter());
        }
        HttpRequest {
            method: self.method.into(),
            url,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
