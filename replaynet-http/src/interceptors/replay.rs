//! Routes dispatch through the fixture transport.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::interceptor::{DeliveryContext, Interceptor};
use crate::mock::MockTransport;
use crate::session::TransportSession;

/// Replaces the context's session with a [`MockTransport`], leaving the
/// request untouched.
#[derive(Clone)]
pub struct ReplayReader {
    session: Arc<dyn TransportSession>,
}

impl ReplayReader {
    /// Replays from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_transport(MockTransport::new(dir))
    }

    /// Replays through a specific transport.
    pub fn with_transport(transport: MockTransport) -> Self {
        Self {
            session: Arc::new(transport),
        }
    }
}

impl Default for ReplayReader {
    fn default() -> Self {
        Self::with_transport(MockTransport::default())
    }
}

impl std::fmt::Debug for ReplayReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayReader")
            .field("session", &self.session.name())
            .finish()
    }
}

#[async_trait]
impl Interceptor for ReplayReader {
    fn name(&self) -> &str {
        "replay"
    }

    fn before_dispatch(&self, context: DeliveryContext) -> DeliveryContext {
        DeliveryContext::new(Arc::clone(&self.session), context.request)
    }
}
