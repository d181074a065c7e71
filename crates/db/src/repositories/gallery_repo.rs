//! Repository for the `photo_galleries` table.

use chrono::Utc;
use sqlx::PgPool;
use transfer_core::publishing::resolve_published_at;
use transfer_core::types::DbId;

use crate::models::feed::SitemapEntry;
use crate::models::gallery::{CreateGallery, GallerySummary, PhotoGallery, UpdateGallery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, description, is_published, published_at, sort_order, \
                       created_at, updated_at";

/// Gallery columns qualified with the `g` alias plus the photo aggregates.
const SUMMARY_COLUMNS: &str = "g.id, g.title, g.slug, g.description, g.is_published, \
     g.published_at, g.sort_order, g.created_at, g.updated_at, \
     (SELECT COUNT(*) FROM gallery_photos p WHERE p.gallery_id = g.id)::BIGINT AS photo_count, \
     (SELECT p.url FROM gallery_photos p WHERE p.gallery_id = g.id \
      ORDER BY p.sort_order, p.id LIMIT 1) AS cover_url";

/// Provides CRUD operations for photo galleries.
pub struct GalleryRepo;

impl GalleryRepo {
    /// Insert a new gallery with an already resolved slug.
    pub async fn create(
        pool: &PgPool,
        input: &CreateGallery,
        slug: &str,
    ) -> Result<PhotoGallery, sqlx::Error> {
        let is_published = input.is_published.unwrap_or(false);
        let query = format!(
            "INSERT INTO photo_galleries (title, slug, description, is_published, published_at, sort_order)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoGallery>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.description)
            .bind(is_published)
            .bind(resolve_published_at(None, is_published, Utc::now()))
            .bind(input.order)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PhotoGallery>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photo_galleries WHERE id = $1");
        sqlx::query_as::<_, PhotoGallery>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a gallery by slug. With `published_only`, drafts are invisible.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<PhotoGallery>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM photo_galleries
             WHERE slug = $1 AND (NOT $2 OR is_published)"
        );
        sqlx::query_as::<_, PhotoGallery>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// List galleries by explicit order, then newest first, with photo
    /// counts and cover urls.
    pub async fn list(
        pool: &PgPool,
        is_published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<GallerySummary>, sqlx::Error> {
        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM photo_galleries g
             WHERE ($1::BOOL IS NULL OR g.is_published = $1)
             ORDER BY g.sort_order ASC, g.created_at DESC, g.id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, GallerySummary>(&query)
            .bind(is_published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, is_published: Option<bool>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT FROM photo_galleries
             WHERE ($1::BOOL IS NULL OR is_published = $1)",
        )
        .bind(is_published)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Slugs and modification times of every published gallery.
    pub async fn sitemap_entries(pool: &PgPool) -> Result<Vec<SitemapEntry>, sqlx::Error> {
        sqlx::query_as::<_, SitemapEntry>(
            "SELECT slug, updated_at FROM photo_galleries
             WHERE is_published
             ORDER BY sort_order ASC, updated_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Whether another gallery already uses `slug`. `exclude_id` skips the
    /// row being updated.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM photo_galleries WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a gallery. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGallery,
    ) -> Result<Option<PhotoGallery>, sqlx::Error> {
        let query = format!(
            "UPDATE photo_galleries SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                is_published = COALESCE($5, is_published),
                published_at = COALESCE(
                    published_at,
                    CASE WHEN COALESCE($5, is_published) THEN $6 END
                ),
                sort_order = COALESCE($7, sort_order)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoGallery>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(input.is_published)
            .bind(Utc::now())
            .bind(input.order)
            .fetch_optional(pool)
            .await
    }

    /// Publish or hide a gallery. `published_at` keeps its first value.
    pub async fn set_published(
        pool: &PgPool,
        id: DbId,
        publish: bool,
    ) -> Result<Option<PhotoGallery>, sqlx::Error> {
        let query = format!(
            "UPDATE photo_galleries SET
                is_published = $2,
                published_at = COALESCE(published_at, $3)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PhotoGallery>(&query)
            .bind(id)
            .bind(publish)
            .bind(resolve_published_at(None, publish, Utc::now()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a gallery by ID; its photos go with it (`ON DELETE CASCADE`).
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM photo_galleries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
