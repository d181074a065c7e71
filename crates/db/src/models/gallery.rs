//! Photo gallery and gallery photo models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::slug::validate_slug_field;
use transfer_core::types::{DbId, Timestamp};
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

// ---------------------------------------------------------------------------
// Gallery
// ---------------------------------------------------------------------------

/// A row from the `photo_galleries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoGallery {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Gallery list item with its photo count and the url of the first photo.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GallerySummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub gallery: PhotoGallery,
    pub photo_count: i64,
    pub cover_url: Option<String>,
}

/// A gallery together with its photos in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryWithPhotos {
    #[serde(flatten)]
    pub gallery: PhotoGallery,
    pub photos: Vec<GalleryPhoto>,
}

/// DTO for creating a gallery.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGallery {
    #[serde(default)]
    #[validate(length(min = 3, max = 200))]
    pub title: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// DTO for updating a gallery. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGallery {
    #[validate(length(min = 3, max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_slug_field"))]
    pub slug: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// A row from the `gallery_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryPhoto {
    pub id: DbId,
    pub gallery_id: DbId,
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "order")]
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding one photo. Omitting `order` appends after the last photo.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryPhoto {
    #[serde(default)]
    #[validate(custom(function = "validate_media_url_field"))]
    pub url: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// DTO for updating a photo. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGalleryPhoto {
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub order: Option<i32>,
}

/// Body of `POST /galleries/{id}/photos/batch`. Each URL is checked on its
/// own; the list itself only has to be non-empty and bounded.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreatePhotos {
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub urls: Vec<String>,
}

/// Body of `PUT /galleries/{id}/photos/reorder`: every photo of the gallery,
/// in the desired order.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReorderPhotos {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub photo_ids: Vec<DbId>,
}
