//! Retry policy for pipeline executions.

use std::time::Duration;

use replaynet_core::ServiceError;

/// How many times a failed attempt is repeated.
///
/// Every classified failure is retried the same way, whatever its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Pause before each retry.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with `max_retries` immediate retries.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            delay: Duration::ZERO,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        Self::new(0)
    }

    /// Sets the pause before each retry.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Total attempts including the first.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Whether attempt number `attempt` (1-based) may be followed by another.
    pub fn should_retry(&self, _error: &ServiceError, attempt: u32) -> bool {
        attempt < self.max_attempts()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
