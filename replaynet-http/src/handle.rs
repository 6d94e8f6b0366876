//! Cancellable handle to a running execution.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use replaynet_core::ServiceError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Outcome delivered by an [`ExecutionHandle`]. `None` means the execution
/// was cancelled before it completed.
pub type Delivery<T> = Option<Result<T, ServiceError>>;

/// Handle to an execution spawned by
/// [`ExecutionPipeline::execute`](crate::pipeline::ExecutionPipeline::execute).
///
/// Awaiting the handle yields the outcome. [`cancel`](Self::cancel) stops
/// further attempts; if it happens before the terminal outcome, no
/// post-dispatch hook runs and the handle resolves to `None`. Dropping the
/// handle without cancelling detaches the execution, which still runs to
/// completion and notifies its interceptors.
#[derive(Debug)]
pub struct ExecutionHandle<T> {
    task: JoinHandle<Delivery<T>>,
    cancel: CancellationToken,
}

impl<T> ExecutionHandle<T> {
    pub(crate) fn new(task: JoinHandle<Delivery<T>>, cancel: CancellationToken) -> Self {
        Self { task, cancel }
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// A token that cancels this execution when triggered.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the execution has finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl<T> Future for ExecutionHandle<T> {
    type Output = Delivery<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.task).poll(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Ok(delivery)) => Poll::Ready(delivery),
            Poll::Ready(Err(e)) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Poll::Ready(Err(_)) => Poll::Ready(None),
        }
    }
}
