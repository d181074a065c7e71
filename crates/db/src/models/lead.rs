//! Lead models: callback applications and transfer booking requests.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use transfer_core::coerce;
use transfer_core::leads::{validate_contact_method_field, validate_phone_field};
use transfer_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `application_requests` table: a "call me back" form.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub id: DbId,
    pub name: String,
    pub phone: String,
    pub contact_method: String,
    pub message: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_phone_field"))]
    pub phone: String,
    #[serde(default)]
    #[validate(custom(function = "validate_contact_method_field"))]
    pub contact_method: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 2000))]
    pub message: Option<String>,
}

/// A row from the `transfer_requests` table: a booking enquiry.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub id: DbId,
    pub customer_name: String,
    pub customer_phone: String,
    pub contact_method: String,
    pub from_location: Option<String>,
    pub to_location: Option<String>,
    pub date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub passengers: Option<i32>,
    pub vehicle_id: Option<DbId>,
    pub comment: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Dates are ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    #[serde(default)]
    #[validate(length(min = 2, max = 100))]
    pub customer_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_phone_field"))]
    pub customer_phone: String,
    #[serde(default)]
    #[validate(custom(function = "validate_contact_method_field"))]
    pub contact_method: String,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 200))]
    pub from_location: Option<String>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 200))]
    pub to_location: Option<String>,
    #[validate(required)]
    pub date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "coerce::opt_int")]
    #[validate(range(min = 1, max = 50))]
    pub passengers: Option<i32>,
    pub vehicle_id: Option<DbId>,
    #[serde(default, deserialize_with = "coerce::opt_trimmed")]
    #[validate(length(max = 2000))]
    pub comment: Option<String>,
}

/// Body of `PATCH /{applications|transfers}/{id}/status`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadStatus {
    #[serde(default)]
    #[validate(length(min = 1, max = 50))]
    pub status: String,
}
