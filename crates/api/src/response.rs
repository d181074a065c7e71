//! Shared response envelope types for API handlers.
//!
//! All JSON responses use a `{ "data": ... }` envelope. Paginated lists add
//! a `meta` object next to `data`.

use serde::Serialize;
use transfer_core::pagination::PageMeta;
use transfer_core::types::DbId;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "meta": { page, limit, total, ... } }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Body returned by every DELETE endpoint.
#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub id: DbId,
    pub deleted: bool,
}

impl DeleteAck {
    pub fn new(id: DbId) -> DataResponse<DeleteAck> {
        DataResponse {
            data: DeleteAck { id, deleted: true },
        }
    }
}
