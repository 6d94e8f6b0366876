//! Real network session backed by `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use replaynet_core::HttpRequest;
use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::session::{RawResponse, TransportSession};
use crate::settings::PipelineSettings;

// ============================================================================
// Reqwest Session
// ============================================================================

/// [`TransportSession`] that sends requests over the network.
#[derive(Debug, Clone)]
pub struct ReqwestSession {
    inner: Client,
}

impl ReqwestSession {
    /// Creates a session with the default timeout and user agent.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::from_settings(&PipelineSettings::default())
    }

    /// Creates a session with a custom timeout and user agent.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { inner: client })
    }

    /// Creates a session from pipeline settings.
    ///
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn from_settings(settings: &PipelineSettings) -> Result<Self, TransportError> {
        Self::with_timeout(settings.timeout(), &settings.user_agent)
    }

    /// Wraps an existing client.
    pub fn from_client(client: Client) -> Self {
        Self { inner: client }
    }
}

#[async_trait]
impl TransportSession for ReqwestSession {
    fn name(&self) -> &str {
        "network"
    }

    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        let mut builder = self
            .inner
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = i32::from(response.status().as_u16());
        let headers = response.headers().clone();
        debug!(status, "Response received");

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::CannotDecode(e.to_string()))?;

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
