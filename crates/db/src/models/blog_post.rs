//! Blog post entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::slug::validate_slug_field;
use transfer_core::types::{DbId, Timestamp};
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub is_published: bool,
    /// Stamped the first time the post is published, never cleared.
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a blog post.
///
/// `slug` is derived from the title when omitted and `excerpt` from the
/// content.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogPost {
    #[serde(default)]
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 100000))]
    pub content: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
}

/// DTO for updating a blog post. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogPost {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 100000))]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 500))]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
}
