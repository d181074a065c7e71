//! Repository for the `reviews` table.

use sqlx::PgPool;
use transfer_core::publishing::{ReviewFilter, ReviewFlags};
use transfer_core::types::DbId;

use crate::models::review::{CreateReview, Review, ReviewStats, UpdateReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, customer_name, rating, comment, image_url, review_image_url, \
                       video_url, is_approved, is_published, moderated_at, created_at, updated_at";

/// SQL predicate selecting the rows of a moderation filter.
fn filter_clause(filter: Option<ReviewFilter>) -> &'static str {
    match filter {
        None => "TRUE",
        Some(ReviewFilter::Pending) => "NOT is_approved AND moderated_at IS NULL",
        Some(ReviewFilter::Approved) => "is_approved",
        Some(ReviewFilter::Rejected) => "NOT is_approved AND moderated_at IS NOT NULL",
        Some(ReviewFilter::Published) => "is_published",
    }
}

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review with the given (already checked) flags.
    pub async fn create(
        pool: &PgPool,
        input: &CreateReview,
        flags: ReviewFlags,
    ) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (customer_name, rating, comment, image_url, review_image_url,
                                  video_url, is_approved, is_published)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.customer_name)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(&input.image_url)
            .bind(&input.review_image_url)
            .bind(&input.video_url)
            .bind(flags.is_approved)
            .bind(flags.is_published)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List reviews newest first, optionally narrowed to a moderation state.
    pub async fn list(
        pool: &PgPool,
        filter: Option<ReviewFilter>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE {}
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2",
            filter_clause(filter)
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, filter: Option<ReviewFilter>) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*)::BIGINT FROM reviews WHERE {}",
            filter_clause(filter)
        );
        let row: (i64,) = sqlx::query_as(&query).fetch_one(pool).await?;
        Ok(row.0)
    }

    /// Update a review. Only non-`None` fields in `input` are applied;
    /// `flags` is the full resulting flag pair. Changing either flag counts
    /// as a moderation decision.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReview,
        flags: ReviewFlags,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                customer_name = COALESCE($2, customer_name),
                rating = COALESCE($3, rating),
                comment = COALESCE($4, comment),
                image_url = COALESCE($5, image_url),
                review_image_url = COALESCE($6, review_image_url),
                video_url = COALESCE($7, video_url),
                moderated_at = CASE
                    WHEN is_approved <> $8 OR is_published <> $9 THEN NOW()
                    ELSE moderated_at
                END,
                is_approved = $8,
                is_published = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(&input.customer_name)
            .bind(input.rating)
            .bind(&input.comment)
            .bind(&input.image_url)
            .bind(&input.review_image_url)
            .bind(&input.video_url)
            .bind(flags.is_approved)
            .bind(flags.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Record a moderation decision: both flags are written together.
    pub async fn moderate(
        pool: &PgPool,
        id: DbId,
        flags: ReviewFlags,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                is_approved = $2,
                is_published = $3,
                moderated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(flags.is_approved)
            .bind(flags.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Count and mean rating of published reviews.
    pub async fn stats(pool: &PgPool) -> Result<ReviewStats, sqlx::Error> {
        sqlx::query_as::<_, ReviewStats>(
            "SELECT COUNT(*)::BIGINT AS total, AVG(rating)::FLOAT8 AS average_rating
             FROM reviews WHERE is_published",
        )
        .fetch_one(pool)
        .await
    }

    /// Delete a review by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
