//! Records execution outcomes as fixture files.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use replaynet_core::{HttpRequest, ServiceError};
use tracing::{error, info};

use crate::fixture::{is_completion_sentinel, FixtureDir};
use crate::interceptor::Interceptor;

/// Writes every terminal outcome to the fixture its annotated request maps
/// to: the body on success, the serialized [`ServiceError`] on failure.
///
/// Write failures are logged and never affect the execution outcome.
/// Sentinel-completed requests are not recorded.
#[derive(Debug, Clone, Default)]
pub struct ResponseRecorder {
    fixtures: FixtureDir,
}

impl ResponseRecorder {
    /// Records into `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            fixtures: FixtureDir::new(dir),
        }
    }

    /// Records into an existing fixture directory handle.
    pub fn from_fixtures(fixtures: FixtureDir) -> Self {
        Self { fixtures }
    }

    /// The fixture directory.
    pub fn fixtures(&self) -> &FixtureDir {
        &self.fixtures
    }
}

#[async_trait]
impl Interceptor for ResponseRecorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn after_dispatch(
        &self,
        request: &HttpRequest,
        output: Option<&Bytes>,
        error: Option<&ServiceError>,
    ) {
        if is_completion_sentinel(request) {
            return;
        }

        let body = match (output, error) {
            (Some(bytes), _) => bytes.to_vec(),
            (None, Some(err)) => match serde_json::to_vec(err) {
                Ok(json) => json,
                Err(e) => {
                    error!(error = %e, "Failed to serialize service error for recording");
                    return;
                }
            },
            (None, None) => return,
        };

        match self.fixtures.write(request, &body).await {
            Ok(path) => info!(path = %path.display(), "Recorded fixture"),
            Err(e) => error!(
                path = %self.fixtures.path_for(request).display(),
                error = %e,
                "Failed to record fixture"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{annotate_status, COMPLETION_HEADER};
    use serde_json::Value;
    use tempfile::TempDir;

    fn request(url: &str) -> HttpRequest {
        HttpRequest::parse_get(url).unwrap()
    }

    #[tokio::test]
    async fn test_records_success_body() {
        let temp = TempDir::new().unwrap();
        let recorder = ResponseRecorder::new(temp.path());
        let req = annotate_status(&request("https://example.com/api/users"), 200);

        recorder
            .after_dispatch(&req, Some(&Bytes::from_static(b"[]")), None)
            .await;

        let written = std::fs::read(temp.path().join("mock_api_users_200")).unwrap();
        assert_eq!(written, b"[]");
    }

    #[tokio::test]
    async fn test_records_error_json() {
        let temp = TempDir::new().unwrap();
        let recorder = ResponseRecorder::new(temp.path());
        let error = ServiceError::ServerError { code: 500 };
        let req = annotate_status(&request("https://example.com/api/users"), error.code());

        recorder.after_dispatch(&req, None, Some(&error)).await;

        let written = std::fs::read(temp.path().join("mock_api_users_500")).unwrap();
        let value: Value = serde_json::from_slice(&written).unwrap();
        assert_eq!(value["errorType"], "serverError");
        assert_eq!(value["code"], 500);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let recorder = ResponseRecorder::new(blocker.join("sub"));

        recorder
            .after_dispatch(
                &request("https://example.com/a"),
                Some(&Bytes::from_static(b"{}")),
                None,
            )
            .await;
    }

    #[tokio::test]
    async fn test_sentinel_not_recorded() {
        let temp = TempDir::new().unwrap();
        let recorder = ResponseRecorder::new(temp.path());
        let mut req = request("https://example.com/a");
        req.try_set_header(COMPLETION_HEADER, "1").unwrap();

        recorder.after_dispatch(&req, Some(&Bytes::new()), None).await;

        assert!(recorder.fixtures().list().await.unwrap().is_empty());
    }
}
