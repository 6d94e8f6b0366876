//! Bearer token injection.

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::HeaderValue;
use replaynet_core::KeyValueStore;
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::interceptor::{DeliveryContext, Interceptor};

/// Store key holding the authentication token.
pub const TOKEN_KEY: &str = "core-token-authentication-key";

/// Adds `Authorization: Bearer <token>` when the store holds a token.
///
/// The interceptor keeps a watch subscription on the token key, so the
/// latest stored value is used without a store round-trip on every dispatch.
/// Clearing the key stops the header from being added.
#[derive(Debug, Clone)]
pub struct TokenInterceptor {
    token: watch::Receiver<Option<Value>>,
}

impl TokenInterceptor {
    /// Watches [`TOKEN_KEY`] on `store`.
    pub fn new(store: &dyn KeyValueStore) -> Self {
        Self::with_key(store, TOKEN_KEY)
    }

    /// Watches an arbitrary key on `store`.
    pub fn with_key(store: &dyn KeyValueStore, key: &str) -> Self {
        Self {
            token: store.subscribe(key),
        }
    }

    /// Formats a bearer credential.
    pub fn bearer(token: &str) -> String {
        format!("Bearer {token}")
    }

    /// The most recently observed token, if it is a string.
    pub fn current_token(&self) -> Option<String> {
        self.token
            .borrow()
            .as_ref()
            .and_then(Value::as_str)
            .map(String::from)
    }
}

#[async_trait]
impl Interceptor for TokenInterceptor {
    fn name(&self) -> &str {
        "token"
    }

    fn before_dispatch(&self, mut context: DeliveryContext) -> DeliveryContext {
        let Some(token) = self.current_token() else {
            return context;
        };

        match HeaderValue::from_str(&Self::bearer(&token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                context.request.set_header(AUTHORIZATION, value);
                debug!("Added bearer authorization");
            }
            Err(e) => warn!(error = %e, "Stored token is not a valid header value"),
        }
        context
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use replaynet_core::HttpRequest;
    use replaynet_store::JsonFileStore;
    use serde_json::json;
    use std::sync::Arc;

    fn context() -> DeliveryContext {
        DeliveryContext::new(
            Arc::new(MockTransport::default()),
            HttpRequest::parse_get("https://example.com/me").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_no_token_no_header() {
        let store = JsonFileStore::in_memory();
        let interceptor = TokenInterceptor::new(&store);

        let ctx = interceptor.before_dispatch(context());
        assert!(ctx.request.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_token_becomes_bearer_header() {
        let store = JsonFileStore::in_memory();
        let interceptor = TokenInterceptor::new(&store);

        store.set(TOKEN_KEY, Some(json!("abc"))).await.unwrap();

        let ctx = interceptor.before_dispatch(context());
        assert_eq!(ctx.request.header("authorization"), Some("Bearer abc"));
    }

    #[tokio::test]
    async fn test_cleared_token_stops_header() {
        let store = JsonFileStore::in_memory();
        store.set(TOKEN_KEY, Some(json!("abc"))).await.unwrap();
        let interceptor = TokenInterceptor::new(&store);
        assert_eq!(interceptor.current_token().as_deref(), Some("abc"));

        store.set(TOKEN_KEY, None).await.unwrap();
        let ctx = interceptor.before_dispatch(context());
        assert!(ctx.request.header("authorization").is_none());
    }

    #[tokio::test]
    async fn test_non_string_token_ignored() {
        let store = JsonFileStore::in_memory();
        store.set(TOKEN_KEY, Some(json!(42))).await.unwrap();
        let interceptor = TokenInterceptor::new(&store);

        assert!(interceptor.current_token().is_none());
    }
}
