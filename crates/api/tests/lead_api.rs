//! HTTP-level tests for contact requests and transfer bookings.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_auth, login_token, patch_json_auth, post_json, post_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

fn transfer_body() -> Value {
    json!({
        "customerName": "Ivan",
        "customerPhone": "+7 (900) 123-45-67",
        "contactMethod": "telegram",
        "fromLocation": "Airport",
        "toLocation": "City centre",
        "date": "2026-07-01",
        "passengers": 3,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_transfer(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/v1/transfers", transfer_body()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "new");
    assert_eq!(json["data"]["date"], "2026-07-01");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_return_before_trip_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = transfer_body();
    body["returnDate"] = json!("2026-06-30");
    let response = post_json(app, "/api/v1/transfers", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["returnDate"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unparseable_date_is_a_field_error(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = transfer_body();
    body["date"] = json!("tomorrow");
    let response = post_json(app, "/api/v1/transfers", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["details"]["date"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_vehicle_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let mut body = transfer_body();
    body["vehicleId"] = json!(424242);
    let response = post_json(app, "/api/v1/transfers", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["vehicleId"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_bad_contact_method(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/applications",
        json!({ "name": "Oleg", "phone": "89001234567", "contactMethod": "pigeon" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["contactMethod"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_leads_are_admin_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json(
        app.clone(),
        "/api/v1/applications",
        json!({ "name": "Oleg", "phone": "89001234567", "contactMethod": "call" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get(app.clone(), "/api/v1/applications").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = patch_json_auth(
        app.clone(),
        &format!("/api/v1/applications/{id}/status"),
        json!({ "status": "Processed" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "processed");

    let response = get_auth(app, "/api/v1/applications?status=processed", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_transfer_with_existing_vehicle(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/vehicles",
        json!({
            "class": "business",
            "brand": "Mercedes",
            "model": "V-Class",
            "year": 2022,
            "seats": 7,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let vehicle_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let mut body = transfer_body();
    body["vehicleId"] = json!(vehicle_id);
    let response = post_json(app, "/api/v1/transfers", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["vehicleId"], vehicle_id);
}
