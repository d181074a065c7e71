//! HTTP-level tests for priced routes and the vehicle fleet.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete_auth, get, get_auth, login_token, post_json_auth};
use serde_json::{json, Value};
use sqlx::PgPool;

fn route_body(origin: &str, destination: &str) -> Value {
    json!({
        "originCity": origin,
        "destinationCity": destination,
        "distance": 42.5,
        "estimatedTime": "45 min",
        "priceEconomy": 1500,
        "priceComfort": 2200,
        "priceBusiness": 3500,
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_route_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json_auth(app.clone(), "/api/v1/routes", route_body("Sochi", "Adler"), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(app, "/api/v1/routes", route_body("Sochi", "Adler"), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "route between these cities already exists");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_routes_hidden_from_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let mut hidden = route_body("Sochi", "Krasnaya Polyana");
    hidden["isActive"] = json!(false);
    let response = post_json_auth(app.clone(), "/api/v1/routes", hidden, &token).await;
    let hidden_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    post_json_auth(app.clone(), "/api/v1/routes", route_body("Sochi", "Adler"), &token).await;

    let response = get(app.clone(), "/api/v1/routes").await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);

    let response = get(app.clone(), &format!("/api/v1/routes/{hidden_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(app.clone(), "/api/v1/routes?showAll=true", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 2);

    let response = get(app, "/api/v1/routes?origin=sochi&destination=adler").await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vehicle_crud(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/vehicles",
        json!({
            "class": "comfort",
            "brand": "Toyota",
            "model": "Camry",
            "year": 2021,
            "seats": 4,
            "amenities": ["wifi", "water"],
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["id"].as_i64().unwrap();
    assert_eq!(json["data"]["isActive"], true);
    assert_eq!(json["data"]["amenities"][1], "water");

    let response = get(app.clone(), "/api/v1/vehicles?class=comfort").await;
    let json = body_json(response).await;
    assert_eq!(json["meta"]["total"], 1);

    let response = delete_auth(app.clone(), &format!("/api/v1/vehicles/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, &format!("/api/v1/vehicles/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_vehicle_missing_year(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = login_token(app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/vehicles",
        json!({ "class": "comfort", "brand": "Toyota", "model": "Camry", "seats": 4 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["details"]["year"].is_array());
}
