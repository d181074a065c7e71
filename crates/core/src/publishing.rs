//! Visibility rules for publishable content and review moderation.
//!
//! Blog posts and galleries toggle between draft and published. A post
//! remembers the moment it was first published even after it is hidden
//! again. Reviews go through moderation: approving one publishes it in the
//! same step, and a review can never be published while unapproved.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Draft / published
// ---------------------------------------------------------------------------

pub const STATUS_PUBLISHED: &str = "published";
pub const STATUS_DRAFT: &str = "draft";

/// Visibility filter accepted by admin list endpoints (`?status=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    Published,
}

impl PublishStatus {
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_PUBLISHED => Ok(Self::Published),
            other => Err(CoreError::field(
                "status",
                format!("unknown status '{other}', expected draft or published"),
            )),
        }
    }

    pub fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Resolve the `published_at` column for a write.
///
/// `existing` is the stored value (always `None` for inserts), `will_publish`
/// the resulting `is_published`. The timestamp is stamped the first time a
/// row becomes published and never cleared or moved afterwards.
pub fn resolve_published_at(
    existing: Option<Timestamp>,
    will_publish: bool,
    now: Timestamp,
) -> Option<Timestamp> {
    match existing {
        Some(stamped) => Some(stamped),
        None if will_publish => Some(now),
        None => None,
    }
}

// ---------------------------------------------------------------------------
// Review moderation
// ---------------------------------------------------------------------------

pub const REVIEW_PENDING: &str = "pending";
pub const REVIEW_APPROVED: &str = "approved";
pub const REVIEW_REJECTED: &str = "rejected";

/// Moderation state derived from a review's two flags.
///
/// A freshly submitted review and a rejected one share the same flags; the
/// rejected state is recorded by `moderated_at` being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Pending,
    Approved,
    Rejected,
}

/// Flags written by a moderation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewFlags {
    pub is_approved: bool,
    pub is_published: bool,
}

impl ReviewFlags {
    /// Flags for a new public submission.
    pub const PENDING: ReviewFlags = ReviewFlags {
        is_approved: false,
        is_published: false,
    };

    /// Approval grants visibility in the same write.
    pub const APPROVED: ReviewFlags = ReviewFlags {
        is_approved: true,
        is_published: true,
    };

    /// Rejection withdraws visibility.
    pub const REJECTED: ReviewFlags = ReviewFlags {
        is_approved: false,
        is_published: false,
    };

    /// Reject combinations where the review would be visible unapproved.
    pub fn check(self) -> Result<Self, CoreError> {
        if self.is_published && !self.is_approved {
            return Err(CoreError::field(
                "is_published",
                "a review must be approved before it can be published",
            ));
        }
        Ok(self)
    }

    /// Overlay optional requested flags onto the current ones and check the
    /// result.
    pub fn apply(
        self,
        is_approved: Option<bool>,
        is_published: Option<bool>,
    ) -> Result<Self, CoreError> {
        ReviewFlags {
            is_approved: is_approved.unwrap_or(self.is_approved),
            is_published: is_published.unwrap_or(self.is_published),
        }
        .check()
    }
}

/// Parse the admin `?status=` filter for reviews.
pub fn parse_review_filter(value: &str) -> Result<ReviewFilter, CoreError> {
    match value {
        REVIEW_PENDING => Ok(ReviewFilter::Pending),
        REVIEW_APPROVED => Ok(ReviewFilter::Approved),
        REVIEW_REJECTED => Ok(ReviewFilter::Rejected),
        STATUS_PUBLISHED => Ok(ReviewFilter::Published),
        other => Err(CoreError::field(
            "status",
            format!("unknown status '{other}', expected pending, approved, rejected or published"),
        )),
    }
}

/// Admin list filter for reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewFilter {
    /// Not approved and never moderated.
    Pending,
    Approved,
    /// Not approved after an explicit moderation decision.
    Rejected,
    Published,
}

/// Derive the moderation state from stored columns.
pub fn review_state(is_approved: bool, moderated: bool) -> ReviewState {
    match (is_approved, moderated) {
        (true, _) => ReviewState::Approved,
        (false, true) => ReviewState::Rejected,
        (false, false) => ReviewState::Pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    #[test]
    fn first_publish_stamps_timestamp() {
        let now = Utc::now();
        assert_eq!(resolve_published_at(None, true, now), Some(now));
    }

    #[test]
    fn draft_insert_has_no_timestamp() {
        assert_eq!(resolve_published_at(None, false, Utc::now()), None);
    }

    #[test]
    fn republish_keeps_original_timestamp() {
        let first = Utc::now() - Duration::days(3);
        let later = Utc::now();
        // Unpublish: kept.
        assert_eq!(resolve_published_at(Some(first), false, later), Some(first));
        // Publish again: still the original.
        assert_eq!(resolve_published_at(Some(first), true, later), Some(first));
    }

    #[test]
    fn publish_status_parse() {
        assert_eq!(PublishStatus::parse("draft").unwrap(), PublishStatus::Draft);
        assert!(PublishStatus::parse("published").unwrap().is_published());
        assert_matches!(
            PublishStatus::parse("archived"),
            Err(CoreError::InvalidFields(_))
        );
    }

    #[test]
    fn approval_sets_both_flags() {
        let flags = ReviewFlags::APPROVED.check().unwrap();
        assert!(flags.is_approved && flags.is_published);
    }

    #[test]
    fn rejection_never_publishes() {
        assert!(!ReviewFlags::REJECTED.is_published);
        assert!(!ReviewFlags::REJECTED.is_approved);
    }

    #[test]
    fn published_without_approval_is_rejected() {
        assert_matches!(
            ReviewFlags::PENDING.apply(None, Some(true)),
            Err(CoreError::InvalidFields(_))
        );
        assert_matches!(
            ReviewFlags::APPROVED.apply(Some(false), None),
            Err(CoreError::InvalidFields(_))
        );
    }

    #[test]
    fn approved_but_hidden_is_allowed() {
        let flags = ReviewFlags::APPROVED.apply(None, Some(false)).unwrap();
        assert!(flags.is_approved);
        assert!(!flags.is_published);
    }

    #[test]
    fn review_state_from_columns() {
        assert_eq!(review_state(false, false), ReviewState::Pending);
        assert_eq!(review_state(false, true), ReviewState::Rejected);
        assert_eq!(review_state(true, true), ReviewState::Approved);
    }

    #[test]
    fn review_filter_parse() {
        assert_eq!(parse_review_filter("pending").unwrap(), ReviewFilter::Pending);
        assert_eq!(
            parse_review_filter("published").unwrap(),
            ReviewFilter::Published
        );
        assert!(parse_review_filter("spam").is_err());
    }
}
