//! Narrow projections read by the sitemap and feed generators.

use sqlx::FromRow;
use transfer_core::types::Timestamp;

/// A public URL segment and the time its content last changed.
#[derive(Debug, Clone, FromRow)]
pub struct SitemapEntry {
    pub slug: String,
    pub updated_at: Timestamp,
}
