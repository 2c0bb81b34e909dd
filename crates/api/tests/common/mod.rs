#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use keepsake_api::config::ServerConfig;
use keepsake_api::router::build_app_router;
use keepsake_api::state::AppState;
use keepsake_storage::{InMemoryStore, ObjectStore};
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_BUCKET: &str = "keepsake-test";

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default),
/// a 30-second request timeout and a 1 MiB upload limit.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
    }
}

/// Build the full application router with no object store configured.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app(pool, None)
}

/// Build the full application router backed by `store` for uploads.
pub fn build_test_app_with_storage(pool: PgPool, store: Arc<InMemoryStore>) -> Router {
    build_app(pool, Some(store as Arc<dyn ObjectStore>))
}

fn build_app(pool: PgPool, storage: Option<Arc<dyn ObjectStore>>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty(), None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Body::empty(), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(
        app,
        Method::POST,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(
        app,
        Method::PUT,
        uri,
        Body::from(body.to_string()),
        Some("application/json"),
    )
    .await
}

/// Send a raw request with an optional `content-type` header.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Body,
    content_type: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub const MULTIPART_BOUNDARY: &str = "keepsake-test-boundary";

/// POST a single-file multipart form to `uri`.
///
/// `field` is the form field name; the API expects `file`.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    field: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Response<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    let form_type = format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}");
    send(
        app,
        Method::POST,
        uri,
        Body::from(body),
        Some(form_type.as_str()),
    )
    .await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert `response` has `status` and return its JSON body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// The memory from the project README: Malibu beach day with a location.
pub fn beach_day() -> Value {
    json!({
        "title": "Beach Day",
        "date": "2023-04-22",
        "location": {
            "name": "Malibu Beach",
            "latitude": 34.0259,
            "longitude": -118.7798
        }
    })
}

/// Create a memory through the API and return its `data` payload.
pub async fn create_memory(app: Router, body: Value) -> Value {
    let response = post_json(app, "/api/v1/memories", body).await;
    expect_json(response, StatusCode::CREATED).await["data"].clone()
}
