//! Repository for the `vehicles` table.

use sqlx::PgPool;
use transfer_core::types::DbId;

use crate::models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, class, brand, model, year, seats, description, image_url, amenities, \
                       price, is_active, created_at, updated_at";

fn normalize_class(class: &str) -> String {
    class.trim().to_lowercase()
}

/// Provides CRUD operations for the vehicle fleet.
pub struct VehicleRepo;

impl VehicleRepo {
    pub async fn create(pool: &PgPool, input: &CreateVehicle) -> Result<Vehicle, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicles (class, brand, model, year, seats, description, image_url,
                                   amenities, price, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(normalize_class(&input.class))
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.seats)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.amenities)
            .bind(input.price)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicles WHERE id = $1");
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// List vehicles grouped by class, then by brand and model.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        class: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM vehicles
             WHERE (NOT $1 OR is_active) AND ($2::TEXT IS NULL OR class = $2)
             ORDER BY class ASC, brand ASC, model ASC, id ASC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(active_only)
            .bind(class.map(normalize_class))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        active_only: bool,
        class: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT FROM vehicles
             WHERE (NOT $1 OR is_active) AND ($2::TEXT IS NULL OR class = $2)",
        )
        .bind(active_only)
        .bind(class.map(normalize_class))
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a vehicle. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVehicle,
    ) -> Result<Option<Vehicle>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicles SET
                class = COALESCE($2, class),
                brand = COALESCE($3, brand),
                model = COALESCE($4, model),
                year = COALESCE($5, year),
                seats = COALESCE($6, seats),
                description = COALESCE($7, description),
                image_url = COALESCE($8, image_url),
                amenities = COALESCE($9, amenities),
                price = COALESCE($10, price),
                is_active = COALESCE($11, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vehicle>(&query)
            .bind(id)
            .bind(input.class.as_deref().map(normalize_class))
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(input.seats)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(&input.amenities)
            .bind(input.price)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a vehicle by ID. Transfer requests referencing it keep their
    /// row with `vehicle_id` cleared. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
