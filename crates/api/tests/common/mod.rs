//! Shared helpers for the HTTP integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use transfer_api::config::ServerConfig;
use transfer_api::router::build_app_router;
use transfer_api::state::AppState;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "test-password";
pub const BASE_URL: &str = "https://transfer.test";

/// A fresh scratch directory for local uploads.
pub fn scratch_upload_dir() -> PathBuf {
    std::env::temp_dir().join(format!("transfer-api-test-{}", uuid::Uuid::new_v4()))
}

/// Configuration used by every test app: fixed credentials, no remote
/// image host and a small upload limit.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    let upload_dir = upload_dir.to_string_lossy().into_owned();
    ServerConfig::from_lookup(|key| {
        let value = match key {
            "APP_ENV" => "development",
            "BASE_URL" => BASE_URL,
            "ADMIN_USERNAME" => ADMIN_USERNAME,
            "ADMIN_PASSWORD" => ADMIN_PASSWORD,
            "JWT_SECRET" => "integration-test-secret-that-is-long-enough",
            "UPLOAD_DIR" => upload_dir.as_str(),
            "UPLOAD_MAX_BYTES" => "4096",
            "INDEXNOW_KEY" => "test-indexnow-key",
            _ => return None,
        };
        Some(value.to_string())
    })
    .expect("test configuration should load")
}

/// Build the full application router on top of a test pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_uploads(pool, &scratch_upload_dir())
}

pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: &std::path::Path) -> Router {
    let config = test_config(upload_dir);
    let state = AppState::new(pool, config.clone()).expect("state should build");
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("request should complete")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn patch_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::PATCH, uri, Some(token))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

/// Send a prebuilt request (multipart bodies and the like).
pub async fn send_request(app: Router, request: Request<Body>) -> Response<Body> {
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).expect("body should be JSON")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}

/// Log in with the test credentials and return the bearer token.
pub async fn login_token(app: Router) -> String {
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["token"]
        .as_str()
        .expect("login should return a token")
        .to_string()
}
