//! Domain rules for the transfer site backend.
//!
//! Nothing in this crate touches the network or the database. The `db` and
//! `api` crates build on these types so the same rules apply to every entry
//! point.

pub mod batch;
pub mod coerce;
pub mod error;
pub mod feed;
pub mod leads;
pub mod pagination;
pub mod publishing;
pub mod slug;
pub mod types;
pub mod upload;
