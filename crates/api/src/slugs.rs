//! Slug resolution for blog posts and galleries.
//!
//! A client-supplied slug must be free; a slug derived from the title gets a
//! random suffix once if the plain form is taken. Either way the unique
//! constraint in the database has the final word.

use transfer_core::error::CoreError;
use transfer_core::slug::{candidate_from_title, with_random_suffix};
use transfer_core::types::DbId;
use transfer_db::repositories::{BlogPostRepo, GalleryRepo};
use transfer_db::DbPool;

use crate::error::{conflict_message, AppResult};

/// Table whose slug namespace is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugScope {
    BlogPost,
    Gallery,
}

impl SlugScope {
    /// Prefix used when the title reduces to almost nothing.
    fn fallback(self) -> &'static str {
        match self {
            SlugScope::BlogPost => "post",
            SlugScope::Gallery => "gallery",
        }
    }

    fn constraint(self) -> &'static str {
        match self {
            SlugScope::BlogPost => "uq_blog_posts_slug",
            SlugScope::Gallery => "uq_photo_galleries_slug",
        }
    }

    async fn exists(self, pool: &DbPool, slug: &str, exclude_id: Option<DbId>) -> AppResult<bool> {
        let taken = match self {
            SlugScope::BlogPost => BlogPostRepo::slug_exists(pool, slug, exclude_id).await?,
            SlugScope::Gallery => GalleryRepo::slug_exists(pool, slug, exclude_id).await?,
        };
        Ok(taken)
    }

    fn conflict(self) -> CoreError {
        CoreError::Conflict(conflict_message(self.constraint()))
    }
}

/// Pick the slug for a new row.
pub async fn resolve_for_create(
    pool: &DbPool,
    scope: SlugScope,
    explicit: Option<&str>,
    title: &str,
) -> AppResult<String> {
    if let Some(slug) = explicit {
        if scope.exists(pool, slug, None).await? {
            return Err(scope.conflict().into());
        }
        return Ok(slug.to_string());
    }

    let candidate = candidate_from_title(title, scope.fallback());
    if scope.exists(pool, &candidate, None).await? {
        return Ok(with_random_suffix(&candidate));
    }
    Ok(candidate)
}

/// Reject a slug change that would collide with another row. The row being
/// updated does not count as a collision with itself.
pub async fn ensure_available(
    pool: &DbPool,
    scope: SlugScope,
    id: DbId,
    slug: &str,
) -> AppResult<()> {
    if scope.exists(pool, slug, Some(id)).await? {
        return Err(scope.conflict().into());
    }
    Ok(())
}
