//! Bearer token injection through the pipeline.

mod common;

use replaynet_core::{HttpRequest, KeyValueStore, KeyValueStoreExt};
use replaynet_http::{ExecutionPipeline, TokenInterceptor, TOKEN_KEY};
use replaynet_store::JsonFileStore;
use serde_json::json;
use tempfile::TempDir;

use common::EchoSession;

fn request() -> HttpRequest {
    HttpRequest::parse_get("https://api.example.com/me").unwrap()
}

#[tokio::test]
async fn test_authorization_follows_store() {
    let store = JsonFileStore::in_memory();
    let session = EchoSession::new(200, "{}");
    let pipeline = ExecutionPipeline::new(session.clone());
    pipeline.register(TokenInterceptor::new(&store));

    pipeline.response(request()).await.unwrap();
    store.set(TOKEN_KEY, Some(json!("s3cret"))).await.unwrap();
    pipeline.response(request()).await.unwrap();

    let seen = session.seen();
    assert_eq!(seen.len(), 2);
    assert!(seen[0].header("authorization").is_none());
    assert_eq!(seen[1].header("authorization"), Some("Bearer s3cret"));
}

#[tokio::test]
async fn test_token_from_persisted_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store.json");
    {
        let store = JsonFileStore::open(path.clone()).await.unwrap();
        store.set_as(TOKEN_KEY, &"from-disk").await.unwrap();
    }

    let store = JsonFileStore::open(path).await.unwrap();
    let session = EchoSession::new(200, "{}");
    let pipeline = ExecutionPipeline::new(session.clone());
    pipeline.register(TokenInterceptor::new(&store));

    pipeline.execute(request()).await.unwrap().unwrap();

    assert_eq!(
        session.seen()[0].header("authorization"),
        Some("Bearer from-disk")
    );
}
