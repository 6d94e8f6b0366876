//! Outgoing request model.
//!
//! [`HttpRequest`] is the value that interceptors see and rewrite during the
//! pre-dispatch fold. Every attempt starts from a clone of the caller's
//! request.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::Method;
use url::Url;

use crate::error::CoreError;

/// A fully resolved HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Request method.
    pub method: Method,
    /// Target URL, query included.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Optional body.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Creates a request with no headers and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Parses `url` and creates a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidUrl`] if the URL does not parse.
    pub fn parse_get(url: &str) -> Result<Self, CoreError> {
        let url = Url::parse(url).map_err(|e| CoreError::InvalidUrl(e.to_string()))?;
        Ok(Self::get(url))
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns true if the header is present, whatever its value.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Sets a header, replacing any previous value.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Sets a header from strings.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHeader`] if the name or value is not a
    /// valid HTTP header token.
    pub fn try_set_header(&mut self, name: &str, value: &str) -> Result<(), CoreError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoreError::InvalidHeader(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| CoreError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(())
    }

    /// Builder-style variant of [`Self::set_header`].
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.set_header(name, value);
        self
    }

    /// Non-empty path segments of the URL, in order.
    pub fn path_segments(&self) -> Vec<String> {
        self.url
            .path_segments()
            .map(|segments| {
                segments
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
