//! Execution pipeline: interceptor fold, dispatch, classification, retry,
//! post-dispatch notification and decoding.
//!
//! Each attempt starts from the caller's request. The registered
//! interceptors are folded over a fresh [`DeliveryContext`], the resulting
//! session dispatches the resulting request, and the raw result is
//! classified. Failures are retried per the [`RetryPolicy`]. Once the
//! terminal outcome is known every interceptor's
//! [`after_dispatch`](Interceptor::after_dispatch) runs in registration order
//! with the dispatched request annotated with the outcome's status.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use bytes::Bytes;
use replaynet_core::{Endpoint, HttpRequest, ServiceError};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn, Instrument, Span};

use crate::classify::classify;
use crate::decode::decode;
use crate::error::TransportError;
use crate::fixture::{annotate_status, DEFAULT_STATUS};
use crate::handle::{Delivery, ExecutionHandle};
use crate::host::http::ReqwestSession;
use crate::interceptor::{fold_chain, DeliveryContext, Interceptor};
use crate::interceptors::{ReplayReader, ResponseRecorder};
use crate::retry::RetryPolicy;
use crate::session::TransportSession;
use crate::settings::{PipelineSettings, TransportMode};

// ============================================================================
// Execution Pipeline
// ============================================================================

/// Executes requests through a chain of interceptors.
///
/// The interceptor list is captured when an execution starts; registering
/// an interceptor later affects only executions started afterwards.
pub struct ExecutionPipeline {
    session: Arc<dyn TransportSession>,
    interceptors: RwLock<Vec<Arc<dyn Interceptor>>>,
    retry: RetryPolicy,
}

impl ExecutionPipeline {
    /// Creates a pipeline with no interceptors and the default retry policy.
    pub fn new(session: Arc<dyn TransportSession>) -> Self {
        Self::with_interceptors(session, Vec::new())
    }

    /// Creates a pipeline with an initial interceptor list.
    pub fn with_interceptors(
        session: Arc<dyn TransportSession>,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Self {
        Self {
            session,
            interceptors: RwLock::new(interceptors),
            retry: RetryPolicy::default(),
        }
    }

    /// Creates a network pipeline from settings, installing the recorder or
    /// replay reader the settings' mode asks for.
    ///
    /// # Errors
    ///
    /// Fails if the network session cannot be built.
    pub fn from_settings(settings: &PipelineSettings) -> Result<Self, TransportError> {
        let session = Arc::new(ReqwestSession::from_settings(settings)?);
        let pipeline = Self::new(session).with_retry(settings.retry_policy());

        let fixture_dir = settings.resolved_fixture_dir();
        match settings.mode {
            TransportMode::Network => {}
            TransportMode::Record => pipeline.register(ResponseRecorder::new(fixture_dir)),
            TransportMode::Replay => pipeline.register(ReplayReader::new(fixture_dir)),
        }

        debug!(mode = %settings.mode, max_retries = settings.max_retries, "Built pipeline from settings");
        Ok(pipeline)
    }

    /// Replaces the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// The retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Appends an interceptor to the chain.
    pub fn register_interceptor(&self, interceptor: Arc<dyn Interceptor>) {
        debug!(interceptor = interceptor.name(), "Registering interceptor");
        self.interceptors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(interceptor);
    }

    /// Appends an owned interceptor to the chain.
    pub fn register<I: Interceptor + 'static>(&self, interceptor: I) {
        self.register_interceptor(Arc::new(interceptor));
    }

    /// Number of registered interceptors.
    pub fn interceptor_count(&self) -> usize {
        self.interceptors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn snapshot(&self) -> Execution {
        Execution {
            session: Arc::clone(&self.session),
            interceptors: self
                .interceptors
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
            retry: self.retry.clone(),
        }
    }

    /// Starts executing `request` on the runtime and returns a cancellable
    /// handle to its outcome.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub fn execute(&self, request: HttpRequest) -> ExecutionHandle<Bytes> {
        let execution = self.snapshot();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(
            async move { execution.run(request, &token).await }.instrument(Span::current()),
        );
        ExecutionHandle::new(task, cancel)
    }

    /// Starts executing the request described by `endpoint`.
    pub fn execute_endpoint(&self, endpoint: &Endpoint) -> ExecutionHandle<Bytes> {
        self.execute(endpoint.to_request())
    }

    /// Starts executing `endpoint` and decodes the success bytes into `T`
    /// under the endpoint's decode policy.
    #[instrument(skip(self, endpoint), fields(url = %endpoint.url()))]
    pub fn execute_decoded<T>(&self, endpoint: &Endpoint) -> ExecutionHandle<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let execution = self.snapshot();
        let request = endpoint.to_request();
        let policy = endpoint.decode_policy();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = tokio::spawn(
            async move {
                let delivery = execution.run(request, &token).await?;
                Some(delivery.and_then(|bytes| decode::<T>(&bytes, policy)))
            }
            .instrument(Span::current()),
        );
        ExecutionHandle::new(task, cancel)
    }

    /// Executes `request` on the current task and returns its outcome.
    pub async fn response(&self, request: HttpRequest) -> Result<Bytes, ServiceError> {
        self.snapshot().complete(request).await
    }

    /// Executes `endpoint` on the current task and decodes the outcome.
    pub async fn response_decoded<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
    ) -> Result<T, ServiceError> {
        let bytes = self.response(endpoint.to_request()).await?;
        decode(&bytes, endpoint.decode_policy())
    }
}

impl fmt::Debug for ExecutionPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionPipeline")
            .field("session", &self.session.name())
            .field("interceptors", &self.interceptor_count())
            .field("retry", &self.retry)
            .finish()
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Everything one execution needs, captured at start.
struct Execution {
    session: Arc<dyn TransportSession>,
    interceptors: Vec<Arc<dyn Interceptor>>,
    retry: RetryPolicy,
}

impl Execution {
    /// Runs to completion, notifying interceptors.
    async fn complete(&self, request: HttpRequest) -> Result<Bytes, ServiceError> {
        let (dispatched, outcome) = self.dispatch_with_retry(request).await;
        self.notify(&dispatched, &outcome).await;
        outcome
    }

    /// Runs until completion or cancellation. Cancellation observed before
    /// the terminal outcome suppresses notification and delivery.
    async fn run(&self, request: HttpRequest, cancel: &CancellationToken) -> Delivery<Bytes> {
        let (dispatched, outcome) = tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Execution cancelled");
                return None;
            }
            finished = self.dispatch_with_retry(request) => finished,
        };

        if cancel.is_cancelled() {
            debug!("Execution cancelled");
            return None;
        }

        self.notify(&dispatched, &outcome).await;
        Some(outcome)
    }

    async fn dispatch_with_retry(
        &self,
        request: HttpRequest,
    ) -> (HttpRequest, Result<Bytes, ServiceError>) {
        let start = Instant::now();
        let mut attempt = 1;

        loop {
            let DeliveryContext {
                session,
                request: outgoing,
            } = fold_chain(
                &self.interceptors,
                DeliveryContext::new(Arc::clone(&self.session), request.clone()),
            );

            debug!(attempt, session = session.name(), url = %outgoing.url, "Dispatching request");

            match classify(session.send(&outgoing).await) {
                Ok(body) => {
                    info!(
                        attempts = attempt,
                        bytes = body.len(),
                        duration = ?start.elapsed(),
                        "Execution succeeded"
                    );
                    return (outgoing, Ok(body));
                }
                Err(error) if self.retry.should_retry(&error, attempt) => {
                    warn!(
                        attempt,
                        kind = error.tag(),
                        code = error.code(),
                        "Attempt failed, retrying"
                    );
                    if !self.retry.delay.is_zero() {
                        tokio::time::sleep(self.retry.delay).await;
                    }
                    attempt += 1;
                }
                Err(error) => {
                    info!(
                        attempts = attempt,
                        kind = error.tag(),
                        code = error.code(),
                        duration = ?start.elapsed(),
                        "Execution failed"
                    );
                    return (outgoing, Err(error));
                }
            }
        }
    }

    async fn notify(&self, dispatched: &HttpRequest, outcome: &Result<Bytes, ServiceError>) {
        let status = match outcome {
            Ok(_) => DEFAULT_STATUS,
            Err(error) => error.code(),
        };
        let annotated = annotate_status(dispatched, status);

        for interceptor in &self.interceptors {
            debug!(interceptor = interceptor.name(), status, "Notifying interceptor");
            interceptor
                .after_dispatch(&annotated, outcome.as_ref().ok(), outcome.as_ref().err())
                .await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
