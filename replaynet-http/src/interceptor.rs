//! Interceptor trait and the delivery context it transforms.
//!
//! Before each dispatch attempt the pipeline folds the registered
//! interceptors over a fresh [`DeliveryContext`] in registration order. After
//! the terminal outcome it calls [`Interceptor::after_dispatch`] on each, in
//! the same order, awaiting one before the next.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use replaynet_core::{HttpRequest, ServiceError};

use crate::session::TransportSession;

// ============================================================================
// Delivery Context
// ============================================================================

/// The session that will dispatch, and the request it will dispatch.
#[derive(Clone)]
pub struct DeliveryContext {
    /// Session the request is sent through.
    pub session: Arc<dyn TransportSession>,
    /// Request to send.
    pub request: HttpRequest,
}

impl DeliveryContext {
    /// Creates a context.
    pub fn new(session: Arc<dyn TransportSession>, request: HttpRequest) -> Self {
        Self { session, request }
    }
}

impl fmt::Debug for DeliveryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryContext")
            .field("session", &self.session.name())
            .field("request", &self.request)
            .finish()
    }
}

// ============================================================================
// Interceptor Trait
// ============================================================================

/// A pluggable stage around dispatch.
///
/// Both hooks default to doing nothing, so an interceptor implements only
/// the side it cares about.
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str {
        "interceptor"
    }

    /// Transforms the context before dispatch. Must not block.
    fn before_dispatch(&self, context: DeliveryContext) -> DeliveryContext {
        context
    }

    /// Observes the terminal outcome of an execution.
    ///
    /// `request` is the dispatched request annotated with the outcome's
    /// status. Exactly one of `output` and `error` is `Some`.
    async fn after_dispatch(
        &self,
        _request: &HttpRequest,
        _output: Option<&Bytes>,
        _error: Option<&ServiceError>,
    ) {
    }
}

/// Folds `interceptors` over `context` in order.
pub fn fold_chain(interceptors: &[Arc<dyn Interceptor>], context: DeliveryContext) -> DeliveryContext {
    interceptors
        .iter()
        .fold(context, |ctx, interceptor| interceptor.before_dispatch(ctx))
}
