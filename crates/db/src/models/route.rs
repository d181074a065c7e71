//! Transfer route model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::types::{DbId, Timestamp};
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

/// A row from the `routes` table. Prices are per trip for each car class.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: DbId,
    pub origin_city: String,
    pub destination_city: String,
    /// Kilometres.
    pub distance: f64,
    pub estimated_time: String,
    pub price_economy: f64,
    pub price_comfort: f64,
    pub price_business: f64,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub popularity_rating: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoute {
    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub origin_city: String,
    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub destination_city: String,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(required, range(min = 0.0))]
    pub distance: Option<f64>,
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub estimated_time: String,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(required, range(min = 0.0))]
    pub price_economy: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(required, range(min = 0.0))]
    pub price_comfort: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(required, range(min = 0.0))]
    pub price_business: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub popularity_rating: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_active: Option<bool>,
}

/// DTO for updating a route. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoute {
    #[validate(length(min = 2, max = 100))]
    pub origin_city: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub destination_city: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,
    #[validate(length(min = 1, max = 50))]
    pub estimated_time: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub price_economy: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub price_comfort: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub price_business: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub popularity_rating: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_active: Option<bool>,
}
