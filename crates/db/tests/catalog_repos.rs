//! Integration tests for routes, vehicles, leads and settings singletons.

use chrono::NaiveDate;
use sqlx::PgPool;
use transfer_db::models::lead::{CreateApplicationRequest, CreateTransferRequest};
use transfer_db::models::route::CreateRoute;
use transfer_db::models::settings::{UpdateSiteSettings, UpdateTransferConfig};
use transfer_db::models::vehicle::CreateVehicle;
use transfer_db::repositories::{
    ApplicationRequestRepo, RouteRepo, SiteSettingsRepo, TransferConfigRepo, TransferRequestRepo,
    VehicleRepo,
};

fn new_route(origin: &str, destination: &str, popularity: i32) -> CreateRoute {
    CreateRoute {
        origin_city: origin.to_string(),
        destination_city: destination.to_string(),
        distance: Some(120.0),
        estimated_time: "2h".to_string(),
        price_economy: Some(3000.0),
        price_comfort: Some(4000.0),
        price_business: Some(6000.0),
        popularity_rating: Some(popularity),
        ..Default::default()
    }
}

fn new_vehicle(class: &str) -> CreateVehicle {
    CreateVehicle {
        class: class.to_string(),
        brand: "Toyota".to_string(),
        model: "Camry".to_string(),
        year: Some(2022),
        seats: Some(4),
        ..Default::default()
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn routes_list_by_popularity_and_filter(pool: PgPool) {
    RouteRepo::create(&pool, &new_route("Sochi", "Adler", 5))
        .await
        .unwrap();
    let top = RouteRepo::create(&pool, &new_route("Sochi", "Krasnaya Polyana", 9))
        .await
        .unwrap();
    assert!(top.is_active);

    let all = RouteRepo::list(&pool, true, None, None, 10, 0).await.unwrap();
    assert_eq!(all[0].id, top.id);

    let filtered = RouteRepo::list(&pool, true, Some("sochi"), Some("adler"), 10, 0)
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(
        RouteRepo::count(&pool, true, Some("sochi"), None).await.unwrap(),
        2
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn vehicle_class_is_normalized(pool: PgPool) {
    let vehicle = VehicleRepo::create(&pool, &new_vehicle(" Comfort "))
        .await
        .unwrap();
    assert_eq!(vehicle.class, "comfort");
    assert!(VehicleRepo::exists(&pool, vehicle.id).await.unwrap());

    let comfort = VehicleRepo::list(&pool, true, Some("COMFORT"), 10, 0)
        .await
        .unwrap();
    assert_eq!(comfort.len(), 1);
    assert_eq!(VehicleRepo::count(&pool, true, Some("business")).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn leads_start_as_new_and_change_status(pool: PgPool) {
    let app = ApplicationRequestRepo::create(
        &pool,
        &CreateApplicationRequest {
            name: "Ivan".into(),
            phone: "+7 900 123-45-67".into(),
            contact_method: "telegram".into(),
            message: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(app.status, "new");

    let updated = ApplicationRequestRepo::update_status(&pool, app.id, "contacted")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "contacted");
    assert_eq!(ApplicationRequestRepo::count(&pool, Some("new")).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deleting_vehicle_keeps_transfer_request(pool: PgPool) {
    let vehicle = VehicleRepo::create(&pool, &new_vehicle("business"))
        .await
        .unwrap();
    let request = TransferRequestRepo::create(
        &pool,
        &CreateTransferRequest {
            customer_name: "Olga".into(),
            customer_phone: "89001234567".into(),
            contact_method: "call".into(),
            date: NaiveDate::from_ymd_opt(2026, 7, 1),
            return_date: NaiveDate::from_ymd_opt(2026, 7, 10),
            passengers: Some(2),
            vehicle_id: Some(vehicle.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!(VehicleRepo::delete(&pool, vehicle.id).await.unwrap());
    let kept = TransferRequestRepo::find_by_id(&pool, request.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(kept.vehicle_id, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_row_is_created_lazily_once(pool: PgPool) {
    let first = SiteSettingsRepo::get_or_create_default(&pool).await.unwrap();
    let second = SiteSettingsRepo::get_or_create_default(&pool).await.unwrap();
    assert_eq!(first.site_name, second.site_name);

    let rows: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site_settings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows.0, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_first_reads_all_get_the_row(pool: PgPool) {
    let (a, b, c, d) = tokio::join!(
        SiteSettingsRepo::get_or_create_default(&pool),
        SiteSettingsRepo::get_or_create_default(&pool),
        TransferConfigRepo::get_or_create_default(&pool),
        TransferConfigRepo::get_or_create_default(&pool),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    let (c, d) = (c.unwrap(), d.unwrap());
    assert_eq!(a.site_name, b.site_name);
    assert_eq!(c.currency, d.currency);

    for table in ["site_settings", "transfer_config"] {
        let rows: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows.0, 1, "{table}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn settings_update_is_partial(pool: PgPool) {
    let updated = SiteSettingsRepo::update(
        &pool,
        &UpdateSiteSettings {
            phone: Some("+7 900 000-00-00".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.phone, "+7 900 000-00-00");
    assert_eq!(updated.working_hours, "24/7");

    let config = TransferConfigRepo::update(
        &pool,
        &UpdateTransferConfig {
            currency: Some("eur".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(config.currency, "EUR");
    assert_eq!(config.max_passengers, 8);
}
