use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::building::{Building, COLLECTION};
use crate::store::{DocumentStore, Query};

#[must_use]
pub fn by_invite_code(code: &str) -> Query {
    Query::collection(COLLECTION).filter_eq("inviteCode", code)
}

/// ## Summary
/// Fetches one building by id, decoded.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn get_building(
    store: &dyn DocumentStore,
    building_id: &str,
) -> StoreResult<Option<Stored<Building>>> {
    match store.get(COLLECTION, building_id).await? {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}

/// ## Summary
/// Looks a building up by invite code. No match is `Ok(None)`, never an
/// error; the caller decides the user-facing message.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn find_by_invite_code(
    store: &dyn DocumentStore,
    code: &str,
) -> StoreResult<Option<Stored<Building>>> {
    let docs = store.find(by_invite_code(code)).await?;
    match docs.first() {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}
