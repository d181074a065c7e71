//! Repository for the `blog_posts` table.

use chrono::Utc;
use sqlx::PgPool;
use transfer_core::publishing::resolve_published_at;
use transfer_core::types::DbId;

use crate::models::blog_post::{BlogPost, CreateBlogPost, UpdateBlogPost};
use crate::models::feed::SitemapEntry;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, slug, content, excerpt, image_url, is_published, \
                       published_at, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post with an already resolved slug and excerpt.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBlogPost,
        slug: &str,
        excerpt: &str,
    ) -> Result<BlogPost, sqlx::Error> {
        let is_published = input.is_published.unwrap_or(false);
        let query = format!(
            "INSERT INTO blog_posts (title, slug, content, excerpt, image_url, is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&input.title)
            .bind(slug)
            .bind(&input.content)
            .bind(excerpt)
            .bind(&input.image_url)
            .bind(is_published)
            .bind(resolve_published_at(None, is_published, Utc::now()))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a post by slug. With `published_only`, drafts are invisible.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
        published_only: bool,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE slug = $1 AND (NOT $2 OR is_published)"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .bind(published_only)
            .fetch_optional(pool)
            .await
    }

    /// List posts newest first, optionally filtered by visibility.
    pub async fn list(
        pool: &PgPool,
        is_published: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE ($1::BOOL IS NULL OR is_published = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(is_published)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool, is_published: Option<bool>) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*)::BIGINT FROM blog_posts
             WHERE ($1::BOOL IS NULL OR is_published = $1)",
        )
        .bind(is_published)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Latest published posts by publication time, for the RSS feed.
    pub async fn list_recent_published(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE is_published
             ORDER BY published_at DESC NULLS LAST, id DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Slugs and modification times of every published post.
    pub async fn sitemap_entries(pool: &PgPool) -> Result<Vec<SitemapEntry>, sqlx::Error> {
        sqlx::query_as::<_, SitemapEntry>(
            "SELECT slug, updated_at FROM blog_posts
             WHERE is_published
             ORDER BY updated_at DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Whether another post already uses `slug`. `exclude_id` skips the row
    /// being updated.
    pub async fn slug_exists(
        pool: &PgPool,
        slug: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(
                SELECT 1 FROM blog_posts WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(slug)
        .bind(exclude_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Publishing through an update stamps `published_at` if it was never
    /// set. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                content = COALESCE($4, content),
                excerpt = COALESCE($5, excerpt),
                image_url = COALESCE($6, image_url),
                is_published = COALESCE($7, is_published),
                published_at = COALESCE(
                    published_at,
                    CASE WHEN COALESCE($7, is_published) THEN $8 END
                )
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.content)
            .bind(&input.excerpt)
            .bind(&input.image_url)
            .bind(input.is_published)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Publish or hide a post. `published_at` keeps its first value.
    pub async fn set_published(
        pool: &PgPool,
        id: DbId,
        publish: bool,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                is_published = $2,
                published_at = COALESCE(published_at, $3)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(publish)
            .bind(resolve_published_at(None, publish, Utc::now()))
            .fetch_optional(pool)
            .await
    }

    /// Delete a post by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
