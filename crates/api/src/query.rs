//! Shared query parameter types for API handlers.

use serde::Deserialize;
use transfer_core::pagination::PageRequest;
use transfer_core::publishing::PublishStatus;
use transfer_core::types::DbId;

use crate::error::AppError;

/// `?status=all` lifts the visibility filter like `showAll=true`.
const STATUS_ALL: &str = "all";

/// Pagination and visibility parameters for publishable collections
/// (`?page=&limit=&showAll=&status=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub show_all: bool,
    pub status: Option<String>,
}

impl ListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }

    /// The `status` value when one was given and it is not `all`.
    pub fn status_filter(&self) -> Option<&str> {
        self.status
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != STATUS_ALL)
    }

    fn wants_everything(&self) -> bool {
        self.show_all || self.status.as_deref().map(str::trim) == Some(STATUS_ALL)
    }

    /// Resolve the `is_published` filter for a list query.
    ///
    /// Anonymous readers always get published rows. An admin picks a subset
    /// with `status=draft|published` or lifts the filter with `showAll=true`.
    /// `None` means no filter.
    pub fn publish_filter(&self, is_admin: bool) -> Result<Option<bool>, AppError> {
        if !is_admin {
            return Ok(Some(true));
        }
        if let Some(status) = self.status_filter() {
            return Ok(Some(PublishStatus::parse(status)?.is_published()));
        }
        Ok(if self.wants_everything() { None } else { Some(true) })
    }

    /// Whether an admin asked to see rows hidden from the public.
    pub fn show_hidden(&self, is_admin: bool) -> bool {
        is_admin && self.wants_everything()
    }
}

/// Parameters for `GET /routes`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub show_all: bool,
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// Parameters for `GET /vehicles`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub show_all: bool,
    pub class: Option<String>,
}

/// Parameters for admin lead listings (`?status=&page=&limit=`).
#[derive(Debug, Default, Deserialize)]
pub struct LeadListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<String>,
}

/// `?id=` for moderation actions addressed by query string.
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: DbId,
}

/// Trim an optional free-text filter, dropping it when blank.
pub fn text_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
