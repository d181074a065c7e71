//! Repository for the `routes` table.

use sqlx::PgPool;
use transfer_core::types::DbId;

use crate::models::route::{CreateRoute, Route, UpdateRoute};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, origin_city, destination_city, distance, estimated_time, \
                       price_economy, price_comfort, price_business, description, image_url, \
                       popularity_rating, is_active, created_at, updated_at";

/// Shared `WHERE` for list and count: `$1` active-only, `$2`/`$3` city
/// filters (case-insensitive exact match).
const FILTER: &str = "(NOT $1 OR is_active)
     AND ($2::TEXT IS NULL OR LOWER(origin_city) = LOWER($2))
     AND ($3::TEXT IS NULL OR LOWER(destination_city) = LOWER($3))";

/// Provides CRUD operations for transfer routes.
pub struct RouteRepo;

impl RouteRepo {
    pub async fn create(pool: &PgPool, input: &CreateRoute) -> Result<Route, sqlx::Error> {
        let query = format!(
            "INSERT INTO routes (origin_city, destination_city, distance, estimated_time,
                                 price_economy, price_comfort, price_business, description,
                                 image_url, popularity_rating, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 0), COALESCE($11, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(&input.origin_city)
            .bind(&input.destination_city)
            .bind(input.distance)
            .bind(&input.estimated_time)
            .bind(input.price_economy)
            .bind(input.price_comfort)
            .bind(input.price_business)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.popularity_rating)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Route>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM routes WHERE id = $1");
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List routes, most popular first.
    pub async fn list(
        pool: &PgPool,
        active_only: bool,
        origin: Option<&str>,
        destination: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Route>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routes
             WHERE {FILTER}
             ORDER BY popularity_rating DESC, id ASC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(active_only)
            .bind(origin)
            .bind(destination)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(
        pool: &PgPool,
        active_only: bool,
        origin: Option<&str>,
        destination: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*)::BIGINT FROM routes WHERE {FILTER}");
        let row: (i64,) = sqlx::query_as(&query)
            .bind(active_only)
            .bind(origin)
            .bind(destination)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Every active route, most popular first. Used by the sitemap and the
    /// merchant feed.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Route>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM routes
             WHERE is_active
             ORDER BY popularity_rating DESC, id ASC"
        );
        sqlx::query_as::<_, Route>(&query).fetch_all(pool).await
    }

    /// Update a route. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRoute,
    ) -> Result<Option<Route>, sqlx::Error> {
        let query = format!(
            "UPDATE routes SET
                origin_city = COALESCE($2, origin_city),
                destination_city = COALESCE($3, destination_city),
                distance = COALESCE($4, distance),
                estimated_time = COALESCE($5, estimated_time),
                price_economy = COALESCE($6, price_economy),
                price_comfort = COALESCE($7, price_comfort),
                price_business = COALESCE($8, price_business),
                description = COALESCE($9, description),
                image_url = COALESCE($10, image_url),
                popularity_rating = COALESCE($11, popularity_rating),
                is_active = COALESCE($12, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Route>(&query)
            .bind(id)
            .bind(&input.origin_city)
            .bind(&input.destination_city)
            .bind(input.distance)
            .bind(&input.estimated_time)
            .bind(input.price_economy)
            .bind(input.price_comfort)
            .bind(input.price_business)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.popularity_rating)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a route by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM routes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
