//! Shared helpers for cosmic-api integration tests
//!
//! Upstream services are replaced by local axum servers on `127.0.0.1:0`;
//! their base URLs are injected through `[endpoints]` config.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use cosmic_api::{build_router, AppState};
use cosmic_common::config::{Credential, Credentials, TomlConfig, UpstreamEndpoints};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Nothing listens here; a test that accidentally reaches an upstream fails fast
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// In-memory journal database (single connection so every query sees the same DB)
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    cosmic_api::db::init_tables(&pool).await.unwrap();
    pool
}

/// Serve `router` on an ephemeral port and return its base URL
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Endpoints that all point nowhere
pub fn unreachable_endpoints() -> UpstreamEndpoints {
    UpstreamEndpoints {
        solar_system: UNREACHABLE.to_string(),
        nasa_api: UNREACHABLE.to_string(),
        nasa_images: UNREACHABLE.to_string(),
        youtube: UNREACHABLE.to_string(),
        openai: UNREACHABLE.to_string(),
        fal: UNREACHABLE.to_string(),
    }
}

/// Every credential present
pub fn all_credentials() -> Credentials {
    Credential::ALL
        .into_iter()
        .fold(Credentials::default(), |creds, c| creds.with(c, "test-key"))
}

/// Every credential present except `missing`
pub fn credentials_without(missing: Credential) -> Credentials {
    Credential::ALL
        .into_iter()
        .filter(|c| *c != missing)
        .fold(Credentials::default(), |creds, c| creds.with(c, "test-key"))
}

/// Router backed by an in-memory DB and the given upstreams
pub async fn test_app(endpoints: UpstreamEndpoints, credentials: Credentials) -> Router {
    let config = TomlConfig {
        endpoints,
        ..Default::default()
    };
    let state = AppState::new(test_pool().await, &config, credentials).unwrap();
    build_router(state)
}

/// Issue a GET and decode the JSON body
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    split_response(response).await
}

/// Issue a POST with a JSON body and decode the JSON response
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    split_response(response).await
}

/// Issue a POST with a raw body and optional content type
pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: Option<&str>,
    body: &'static str,
) -> (StatusCode, HeaderMap, Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    let response = app
        .oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    split_response(response).await
}

async fn split_response(response: axum::response::Response) -> (StatusCode, HeaderMap, Value) {
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, json)
}
