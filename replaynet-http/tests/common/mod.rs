//! Shared helpers for pipeline integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use replaynet_core::HttpRequest;
use replaynet_http::{DeliveryContext, Interceptor, RawResponse, TransportError, TransportSession};

/// Counts pre-dispatch folds and remembers the last dispatched request.
#[derive(Default)]
pub struct AttemptCounter {
    attempts: AtomicUsize,
    last: Mutex<Option<HttpRequest>>,
}

impl AttemptCounter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Interceptor for AttemptCounter {
    fn before_dispatch(&self, context: DeliveryContext) -> DeliveryContext {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(context.request.clone());
        context
    }
}

/// Session that echoes a fixed body and captures the request it saw.
pub struct EchoSession {
    status: i32,
    body: &'static str,
    seen: Mutex<Vec<HttpRequest>>,
}

impl EchoSession {
    pub fn new(status: i32, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<HttpRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransportSession for EchoSession {
    fn name(&self) -> &str {
        "echo"
    }

    async fn send(&self, request: &HttpRequest) -> Result<RawResponse, TransportError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(RawResponse::new(self.status, self.body))
    }
}
