//! Pipeline configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::fixture::default_fixture_dir;
use crate::retry::RetryPolicy;

/// Default user agent.
pub const DEFAULT_USER_AGENT: &str = concat!("replaynet/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Transport Mode
// ============================================================================

/// Which built-in interceptors a settings-built pipeline installs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Real network, nothing recorded.
    #[default]
    Network,
    /// Real network, outcomes written to fixtures.
    Record,
    /// Fixtures only.
    Replay,
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Record => write!(f, "record"),
            Self::Replay => write!(f, "replay"),
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "network" => Ok(Self::Network),
            "record" => Ok(Self::Record),
            "replay" => Ok(Self::Replay),
            other => Err(format!("unknown transport mode: {other}")),
        }
    }
}

// ============================================================================
// Pipeline Settings
// ============================================================================

/// Settings for building an [`ExecutionPipeline`](crate::pipeline::ExecutionPipeline).
///
/// Every field has a default, so a partial `config.json` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Pause before each retry, in milliseconds.
    pub retry_delay_ms: u64,
    /// Network request timeout, in seconds.
    pub timeout_secs: u64,
    /// Fixture directory. `None` uses the default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_dir: Option<PathBuf>,
    /// User agent for network requests.
    pub user_agent: String,
    /// Built-in interceptors to install.
    pub mode: TransportMode,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay_ms: 0,
            timeout_secs: 30,
            fixture_dir: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            mode: TransportMode::Network,
        }
    }
}

impl PipelineSettings {
    /// Sets the retry count.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Sets the network timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    /// Sets the fixture directory.
    pub fn with_fixture_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixture_dir = Some(dir.into());
        self
    }

    /// Sets the transport mode.
    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Network timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Configured fixture directory, or the default.
    pub fn resolved_fixture_dir(&self) -> PathBuf {
        self.fixture_dir.clone().unwrap_or_else(default_fixture_dir)
    }

    /// Retry policy described by these settings.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries).with_delay(Duration::from_millis(self.retry_delay_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.max_retries, 3);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.mode, TransportMode::Network);
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: PipelineSettings =
            serde_json::from_str(r#"{"max_retries": 1, "mode": "replay"}"#).unwrap();
        assert_eq!(settings.max_retries, 1);
        assert_eq!(settings.mode, TransportMode::Replay);
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.fixture_dir.is_none());
    }

    #[test]
    fn test_fixture_dir_override() {
        let settings = PipelineSettings::default().with_fixture_dir("/tmp/fx");
        assert_eq!(settings.resolved_fixture_dir(), PathBuf::from("/tmp/fx"));
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!("Record".parse::<TransportMode>(), Ok(TransportMode::Record));
        assert!("tape".parse::<TransportMode>().is_err());
        assert_eq!(TransportMode::Replay.to_string(), "replay");
    }
}
