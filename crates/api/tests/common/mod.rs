#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use kontrola_api::app::build_app;
use kontrola_api::config::ServerConfig;
use kontrola_api::state::AppState;
use kontrola_db::memory::MemoryStore;
use kontrola_db::{Store, StoreError};
use serde_json::Value;
use tower::ServiceExt;

pub const ADMIN_SECRET: &str = "test-admin-secret";

/// Build a test `ServerConfig` with the admin secret set and the default
/// CORS allow-list.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_password: Some(ADMIN_SECRET.to_string()),
        ..ServerConfig::default()
    }
}

/// Build the full application router over `store`.
///
/// Uses the same `build_app` as `main.rs`, so tests exercise the same
/// middleware stack production uses.
pub fn build_test_app(store: Store) -> Router {
    build_app(AppState::new(store, test_config()))
}

/// App with no hosted store configured.
pub fn unconfigured_app() -> Router {
    build_test_app(Store::unconfigured())
}

/// App over a writable in-memory store; the store is returned for
/// inspection.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::new());
    let store = Store::new(memory.clone(), true).with_objects(memory.clone());
    (build_test_app(store), memory)
}

/// App over an in-memory store that only holds the read credential.
pub fn read_only_app() -> (Router, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::new());
    let store = Store::new(memory.clone(), false).with_objects(memory.clone());
    (build_test_app(store), memory)
}

/// App over a store whose every call fails.
pub fn failing_app() -> Router {
    let memory = Arc::new(MemoryStore::failing(
        StoreError::new("connection refused").with_code("PGRST000"),
    ));
    build_test_app(Store::new(memory.clone(), true).with_objects(memory))
}

/// App over an in-memory store whose reads fail while writes still land.
pub fn failing_reads_app() -> (Router, Arc<MemoryStore>) {
    let memory = Arc::new(MemoryStore::failing_reads(
        StoreError::new("canceling statement due to statement timeout").with_code("57014"),
    ));
    let store = Store::new(memory.clone(), true).with_objects(memory.clone());
    (build_test_app(store), memory)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn admin_get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {ADMIN_SECRET}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send `body` as JSON without credentials.
pub async fn json_request(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send `body` as JSON with the admin bearer token.
pub async fn admin_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {ADMIN_SECRET}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// Send a bodiless request with the admin bearer token.
pub async fn admin_empty(app: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {ADMIN_SECRET}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
