//! Vehicle model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::types::{DbId, Timestamp};
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

/// A row from the `vehicles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    /// Service class, stored lowercase (`economy`, `comfort`, ...).
    pub class: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub seats: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub amenities: Option<Vec<String>>,
    pub price: Option<f64>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicle {
    #[serde(default)]
    #[validate(length(min = 2, max = 50))]
    pub class: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(required, range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(required, range(min = 1, max = 60))]
    pub seats: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[validate(length(max = 50))]
    pub amenities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_active: Option<bool>,
}

/// DTO for updating a vehicle. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicle {
    #[validate(length(min = 2, max = 50))]
    pub class: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 1950, max = 2100))]
    pub year: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 1, max = 60))]
    pub seats: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub image_url: Option<String>,
    #[validate(length(max = 50))]
    pub amenities: Option<Vec<String>>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_bool")]
    pub is_active: Option<bool>,
}
