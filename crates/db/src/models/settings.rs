//! Single-row configuration records edited from the admin panel.
//!
//! Each table holds exactly one row with `id = 1`, created with column
//! defaults the first time it is read.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::types::Timestamp;
use transfer_core::upload::validate_media_url_field;
use validator::Validate;

/// Primary key of every settings row.
pub const SETTINGS_ROW_ID: i16 = 1;

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

/// Contact details and default SEO metadata.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub telegram_url: Option<String>,
    pub whatsapp_url: Option<String>,
    pub instagram_url: Option<String>,
    pub working_hours: String,
    pub meta_title: String,
    pub meta_description: String,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteSettings {
    #[validate(length(min = 1, max = 100))]
    pub site_name: Option<String>,
    #[validate(length(max = 50))]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(url)]
    pub telegram_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(url)]
    pub whatsapp_url: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(url)]
    pub instagram_url: Option<String>,
    #[validate(length(max = 100))]
    pub working_hours: Option<String>,
    #[validate(length(max = 100))]
    pub meta_title: Option<String>,
    #[validate(length(max = 300))]
    pub meta_description: Option<String>,
}

// ---------------------------------------------------------------------------
// Home page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSettings {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_image_url: Option<String>,
    pub about_title: String,
    pub about_text: String,
    pub cta_text: String,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeSettings {
    #[validate(length(min = 1, max = 200))]
    pub hero_title: Option<String>,
    #[validate(length(max = 500))]
    pub hero_subtitle: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(custom(function = "validate_media_url_field"))]
    pub hero_image_url: Option<String>,
    #[validate(length(max = 200))]
    pub about_title: Option<String>,
    #[validate(length(max = 5000))]
    pub about_text: Option<String>,
    #[validate(length(max = 100))]
    pub cta_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Booking configuration
// ---------------------------------------------------------------------------

/// Booking rules shown next to the transfer form. `currency` also prices
/// the merchant feed.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferConfig {
    pub currency: String,
    pub min_hours_before_trip: i32,
    pub max_passengers: i32,
    pub child_seat_price: f64,
    pub night_surcharge_percent: i32,
    pub booking_notice: String,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransferConfig {
    /// ISO 4217 code.
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0, max = 168))]
    pub min_hours_before_trip: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 1, max = 50))]
    pub max_passengers: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_float")]
    #[validate(range(min = 0.0))]
    pub child_seat_price: Option<f64>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0, max = 100))]
    pub night_surcharge_percent: Option<i32>,
    #[validate(length(max = 1000))]
    pub booking_notice: Option<String>,
}

// ---------------------------------------------------------------------------
// Benefit counters
// ---------------------------------------------------------------------------

/// Marketing counters on the home page.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BenefitStats {
    pub years_experience: i32,
    pub happy_clients: i32,
    pub completed_transfers: i32,
    pub cities_covered: i32,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBenefitStats {
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub years_experience: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub happy_clients: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub completed_transfers: Option<i32>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 0))]
    pub cities_covered: Option<i32>,
}
