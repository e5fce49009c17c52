use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::recurrence::{COLLECTION, RecurrencePattern};
use crate::store::DocumentStore;

/// ## Summary
/// Fetches one recurrence pattern by id, decoded.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn get_pattern(
    store: &dyn DocumentStore,
    recurrence_id: &str,
) -> StoreResult<Option<Stored<RecurrencePattern>>> {
    match store.get(COLLECTION, recurrence_id).await? {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}
