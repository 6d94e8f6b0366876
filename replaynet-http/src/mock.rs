//! Fixture-backed transport for replaying recorded responses.

use std::path::PathBuf;

use async_trait::async_trait;
use replaynet_core::HttpRequest;
use tracing::{debug, instrument};

use crate::error::TransportError;
use crate::fixture::{is_completion_sentinel, status_of, FixtureDir};
use crate::session::{RawResponse, TransportSession};

/// A [`TransportSession`] answering from fixture files.
///
/// The response status is the request's annotated status (200 if absent),
/// the response headers are the request headers, and the body is the file
/// content. A request carrying the completion sentinel header completes
/// immediately with an empty 200 and touches no files.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    fixtures: FixtureDir,
}

impl MockTransport {
    /// Replays from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures: FixtureDir::new(dir),
        }
    }

    /// Replays from an existing fixture directory handle.
    pub fn from_fixtures(fixtures: FixtureDir) -> Self {
        Self { fixtures }
    }

    /// The fixture directory.
    pub fn fixtures(&self) -> &FixtureDir {
        &self.fixtures
    }
}

#[async_trait]
impl TransportSession for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    #[instrument(skip(self, request), fields(url = %request.url))]
    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        if is_completion_sentinel(request) {
            debug!("Completion sentinel present, returning empty response");
            return Ok(RawResponse::empty_ok());
        }

        let body = match self.fixtures.read(request).await {
            Ok(body) => body,
            Err(e) => {
                let path = self.fixtures.path_for(request);
                // Names the filesystem rejects outright can never hold a fixture.
                let exists = tokio::fs::try_exists(&path).await.unwrap_or(false);
                return Err(if exists {
                    TransportError::CannotDecode(format!("{}: {e}", path.display()))
                } else {
                    TransportError::BadTarget(format!("no fixture at {}: {e}", path.display()))
                });
            }
        };

        let status = status_of(request);
        debug!(status, bytes = body.len(), "Replaying fixture");

        Ok(RawResponse {
            status,
            headers: request.headers.clone(),
            body,
        })
    }
}
