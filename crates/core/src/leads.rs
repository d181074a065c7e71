//! Lead (application / transfer request) constants and validation.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use validator::ValidationError;

use crate::error::CoreError;

/// How the customer wants to be contacted back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactMethod {
    Telegram,
    Whatsapp,
    Call,
}

pub const VALID_CONTACT_METHODS: &[&str] = &["telegram", "whatsapp", "call"];

impl ContactMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactMethod::Telegram => "telegram",
            ContactMethod::Whatsapp => "whatsapp",
            ContactMethod::Call => "call",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactMethod {
    type Err = CoreError;

    /// Exact, case-sensitive match. Unknown values are an error, never a
    /// default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "telegram" => Ok(ContactMethod::Telegram),
            "whatsapp" => Ok(ContactMethod::Whatsapp),
            "call" => Ok(ContactMethod::Call),
            other => Err(CoreError::field(
                "contact_method",
                format!(
                    "unknown contact method '{other}', expected one of: {}",
                    VALID_CONTACT_METHODS.join(", ")
                ),
            )),
        }
    }
}

/// `validator` adapter for contact method fields.
pub fn validate_contact_method_field(value: &str) -> Result<(), ValidationError> {
    value.parse::<ContactMethod>().map(|_| ()).map_err(|_| {
        let mut err = ValidationError::new("contact_method");
        err.message = Some(
            format!(
                "must be one of: {}",
                VALID_CONTACT_METHODS.join(", ")
            )
            .into(),
        );
        err
    })
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status assigned to every new lead.
pub const LEAD_STATUS_NEW: &str = "new";

/// Maximum length of the free-text status tag.
pub const MAX_STATUS_LEN: usize = 50;

/// Normalize an admin-supplied status tag (trimmed, lowercased, non-empty).
pub fn normalize_status(status: &str) -> Result<String, CoreError> {
    let status = status.trim().to_lowercase();
    if status.is_empty() {
        return Err(CoreError::field("status", "must not be empty"));
    }
    if status.chars().count() > MAX_STATUS_LEN {
        return Err(CoreError::field(
            "status",
            format!("must be at most {MAX_STATUS_LEN} characters"),
        ));
    }
    Ok(status)
}

// ---------------------------------------------------------------------------
// Phone / trip dates
// ---------------------------------------------------------------------------

/// `validator` adapter: a phone number has 7-15 digits, optionally with
/// `+`, spaces, dashes and parentheses.
pub fn validate_phone_field(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if allowed && (7..=15).contains(&digits) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some("must be a phone number with 7 to 15 digits".into());
        Err(err)
    }
}

/// A return trip cannot precede the outbound one.
pub fn validate_trip_dates(date: NaiveDate, return_date: Option<NaiveDate>) -> Result<(), CoreError> {
    match return_date {
        Some(back) if back < date => Err(CoreError::field(
            "return_date",
            "must not be earlier than date",
        )),
        _ => Ok(()),
    }
}
