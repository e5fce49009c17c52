use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::attendance::{Attendance, COLLECTION};
use crate::query::decode_all;
use crate::store::{DocumentStore, Query};

/// All RSVP records for one event.
#[must_use]
pub fn for_event(event_id: &str) -> Query {
    Query::collection(COLLECTION).filter_eq("minyanEventId", event_id)
}

/// The single record for one (event, user) pair, if any.
#[must_use]
pub fn for_event_and_user(event_id: &str, user_id: &str) -> Query {
    Query::collection(COLLECTION)
        .filter_eq("minyanEventId", event_id)
        .filter_eq("userId", user_id)
}

/// ## Summary
/// Lists all attendance records for an event.
///
/// ## Errors
/// Returns an error on store failure or if a document doesn't decode.
pub async fn list_for_event(
    store: &dyn DocumentStore,
    event_id: &str,
) -> StoreResult<Vec<Stored<Attendance>>> {
    let docs = store.find(for_event(event_id)).await?;
    decode_all(&docs)
}

/// ## Summary
/// Looks up the existing record for a (event, user) pair.
///
/// At most one record exists per pair; if the store ever holds more, the
/// first is returned and subsequent upserts converge on it.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn find_for_user(
    store: &dyn DocumentStore,
    event_id: &str,
    user_id: &str,
) -> StoreResult<Option<Stored<Attendance>>> {
    let docs = store.find(for_event_and_user(event_id, user_id)).await?;
    match docs.first() {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}
