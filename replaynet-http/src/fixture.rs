//! Fixture naming and the on-disk fixture directory.
//!
//! A fixture is the recorded body of one response, stored as a flat file
//! named `mock_<path segments joined by _>_<status>`. Scheme, host, query and
//! method are not part of the name, so two requests that differ only in those
//! share a fixture.

use std::io;
use std::path::{Path, PathBuf};

use bytes::Bytes;
use http::HeaderValue;
use replaynet_core::HttpRequest;
use tracing::debug;

/// Request header carrying the status code a fixture is keyed under.
pub const STATUS_HEADER: &str = "mock_code";

/// Request header that makes [`MockTransport`](crate::mock::MockTransport)
/// complete immediately with an empty success.
pub const COMPLETION_HEADER: &str = "mock_request_completion";

/// Status assumed when [`STATUS_HEADER`] is absent or unparsable.
pub const DEFAULT_STATUS: i32 = 200;

const FIXTURE_PREFIX: &str = "mock_";

// ============================================================================
// Status Annotation
// ============================================================================

/// Reads the status a request is keyed under.
pub fn status_of(request: &HttpRequest) -> i32 {
    request
        .header(STATUS_HEADER)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_STATUS)
}

/// Returns a copy of `request` annotated with `status`.
pub fn annotate_status(request: &HttpRequest, status: i32) -> HttpRequest {
    let mut annotated = request.clone();
    annotated.headers.insert(STATUS_HEADER, HeaderValue::from(status));
    annotated
}

/// Returns true if the request asks for an immediate empty completion.
pub fn is_completion_sentinel(request: &HttpRequest) -> bool {
    request.has_header(COMPLETION_HEADER)
}

// ============================================================================
// Fixture Key
// ============================================================================

/// Identity of a fixture: the request's non-empty path segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    segments: Vec<String>,
}

impl FixtureKey {
    /// Derives the key from a request URL.
    pub fn from_request(request: &HttpRequest) -> Self {
        Self {
            segments: request.path_segments(),
        }
    }

    /// File name for this key under `status`.
    pub fn file_name(&self, status: i32) -> String {
        format!("{FIXTURE_PREFIX}{}_{status}", self.segments.join("_"))
    }
}

/// File name a request maps to, using its annotated status.
pub fn fixture_name(request: &HttpRequest) -> String {
    FixtureKey::from_request(request).file_name(status_of(request))
}

/// Default fixture directory: `<documents>/replaynet`.
///
/// Falls back to the data directory, then to `./fixtures`.
pub fn default_fixture_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::data_dir)
        .map_or_else(|| PathBuf::from("fixtures"), |dir| dir.join("replaynet"))
}

// ============================================================================
// Fixture Directory
// ============================================================================

/// A listed fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureEntry {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

/// Directory holding fixture files.
#[derive(Debug, Clone)]
pub struct FixtureDir {
    root: PathBuf,
}

impl FixtureDir {
    /// Uses `root` as the fixture directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Uses [`default_fixture_dir`].
    pub fn with_default_root() -> Self {
        Self::new(default_fixture_dir())
    }

    /// Directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the fixture `request` maps to.
    pub fn path_for(&self, request: &HttpRequest) -> PathBuf {
        self.root.join(fixture_name(request))
    }

    /// Reads the fixture for `request`.
    ///
    /// Runs on tokio's blocking pool.
    pub async fn read(&self, request: &HttpRequest) -> io::Result<Bytes> {
        let path = self.path_for(request);
        debug!(path = %path.display(), "Reading fixture");
        tokio::fs::read(&path).await.map(Bytes::from)
    }

    /// Writes `body` as the fixture for `request`, creating the directory.
    pub async fn write(&self, request: &HttpRequest, body: &[u8]) -> io::Result<PathBuf> {
        tokio::fs::create_dir_all(&self.root).await?;
        let path = self.path_for(request);
        tokio::fs::write(&path, body).await?;
        debug!(path = %path.display(), bytes = body.len(), "Wrote fixture");
        Ok(path)
    }

    /// Lists fixture files sorted by name. A missing directory lists empty.
    pub async fn list(&self) -> io::Result<Vec<FixtureEntry>> {
        let mut entries = Vec::new();
        let mut dir = match tokio::fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(entries),
            Err(e) => return Err(e),
        };

        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(FIXTURE_PREFIX) {
                continue;
            }
            let metadata = entry.metadata().await?;
            if metadata.is_file() {
                entries.push(FixtureEntry {
                    name,
                    size: metadata.len(),
                });
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Deletes every fixture file and returns how many were removed.
    pub async fn clear(&self) -> io::Result<usize> {
        let entries = self.list().await?;
        for entry in &entries {
            tokio::fs::remove_file(self.root.join(&entry.name)).await?;
        }
        Ok(entries.len())
    }
}

impl Default for FixtureDir {
    fn default() -> Self {
        Self::with_default_root()
    }
}
