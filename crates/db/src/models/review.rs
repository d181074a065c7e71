//! Review entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::publishing::{review_state, ReviewFlags, ReviewState};
use transfer_core::types::{DbId, Timestamp};
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: DbId,
    pub customer_name: String,
    pub rating: i32,
    pub comment: String,
    pub image_url: Option<String>,
    pub review_image_url: Option<String>,
    pub video_url: Option<String>,
    pub is_approved: bool,
    pub is_published: bool,
    /// Set whenever a moderator approves or rejects the review.
    pub moderated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Review {
    pub fn flags(&self) -> ReviewFlags {
        ReviewFlags {
            is_approved: self.is_approved,
            is_published: self.is_published,
        }
    }

    pub fn state(&self) -> ReviewState {
        review_state(self.is_approved, self.moderated_at.is_some())
    }
}

/// Review as returned by the API, with the derived moderation state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    #[serde(flatten)]
    pub review: Review,
    pub status: ReviewState,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        let status = review.state();
        Self { review, status }
    }
}

/// DTO for submitting a review. The flags are only honoured for admins.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReview {
    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub customer_name: String,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(required, range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[serde(default)]
    #[validate(length(min = 3, max = 2000))]
    pub comment: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub review_image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_approved: Option<bool>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
}

/// DTO for updating a review. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReview {
    #[validate(length(min = 2, max = 100))]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 1, max = 5))]
    pub rating: Option<i32>,
    #[validate(length(min = 3, max = 2000))]
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub review_image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_approved: Option<bool>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_published: Option<bool>,
}

/// Aggregate over published reviews.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total: i64,
    pub average_rating: Option<f64>,
}
