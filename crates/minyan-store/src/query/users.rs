use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::user::{COLLECTION, User};
use crate::query::decode_all;
use crate::store::{DocumentStore, Query};

/// Every user whose membership list contains the building.
#[must_use]
pub fn members_of(building_id: &str) -> Query {
    Query::collection(COLLECTION).filter_contains("buildingIds", building_id)
}

/// ## Summary
/// Fetches one user by id, decoded.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn get_user(
    store: &dyn DocumentStore,
    user_id: &str,
) -> StoreResult<Option<Stored<User>>> {
    match store.get(COLLECTION, user_id).await? {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}

/// ## Summary
/// Lists every member of a building.
///
/// ## Errors
/// Returns an error on store failure or if a document doesn't decode.
pub async fn list_members(
    store: &dyn DocumentStore,
    building_id: &str,
) -> StoreResult<Vec<Stored<User>>> {
    let docs = store.find(members_of(building_id)).await?;
    decode_all(&docs)
}
