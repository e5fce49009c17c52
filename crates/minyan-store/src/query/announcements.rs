use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::announcement::{Announcement, COLLECTION};
use crate::query::decode_all;
use crate::store::{DocumentStore, Query};

/// A building's announcements, newest first.
#[must_use]
pub fn for_building(building_id: &str) -> Query {
    Query::collection(COLLECTION)
        .filter_eq("buildingId", building_id)
        .order_desc("createdAt")
}

/// ## Summary
/// Lists a building's announcements, newest first.
///
/// ## Errors
/// Returns an error on store failure or if a document doesn't decode.
pub async fn list_for_building(
    store: &dyn DocumentStore,
    building_id: &str,
) -> StoreResult<Vec<Stored<Announcement>>> {
    let docs = store.find(for_building(building_id)).await?;
    decode_all(&docs)
}
