//! Typed query builders and lookups over the document collections.
//!
//! Pure `Query` constructors are separated from the executing helpers so the
//! same query shape can back both one-shot reads and live watches.

pub mod announcements;
pub mod attendance;
pub mod buildings;
pub mod events;
pub mod recurrences;
pub mod users;

use serde::de::DeserializeOwned;

use crate::document::{Document, Stored};
use crate::error::StoreResult;

/// Decode a result set into typed models paired with their ids.
pub(crate) fn decode_all<T: DeserializeOwned>(docs: &[Document]) -> StoreResult<Vec<Stored<T>>> {
    docs.iter().map(Document::decode_stored).collect()
}
