//! HTTP-level tests for the singleton settings documents.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, login_token, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_defaults_are_created_lazily(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/settings/transfer").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["currency"], "RUB");

    let response = get(app.clone(), "/api/v1/settings/site").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["siteName"], "Transfer");

    let response = get(app, "/api/v1/settings/benefits").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["happyClients"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_keeps_omitted_fields(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = put_json_auth(
        app.clone(),
        "/api/v1/settings/home",
        json!({ "heroTitle": "Airport rides, day and night" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/settings/home").await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["heroTitle"], "Airport rides, day and night");
    assert_eq!(json["data"]["ctaText"], "Book a transfer");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_requires_admin(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/v1/settings/site",
        json!({ "siteName": "Hijacked" }),
        "forged-token",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_settings_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = put_json_auth(
        app,
        "/api/v1/settings/site",
        json!({ "telegramUrl": "not a url" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
