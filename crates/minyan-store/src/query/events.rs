use chrono::NaiveDate;

use crate::document::Stored;
use crate::error::StoreResult;
use crate::model::event::{COLLECTION, MinyanEvent};
use crate::query::decode_all;
use crate::store::{DocumentStore, Query};

/// All events of a building, ordered by date then time.
#[must_use]
pub fn for_building(building_id: &str) -> Query {
    Query::collection(COLLECTION)
        .filter_eq("buildingId", building_id)
        .order_asc("date")
        .order_asc("time")
}

/// A building's events on one calendar date, ordered by time.
#[must_use]
pub fn for_building_on(building_id: &str, date: NaiveDate) -> Query {
    Query::collection(COLLECTION)
        .filter_eq("buildingId", building_id)
        .filter_eq("date", date.to_string())
        .order_asc("time")
}

/// Every event materialized from one recurrence pattern.
#[must_use]
pub fn by_recurrence(recurrence_id: &str) -> Query {
    Query::collection(COLLECTION).filter_eq("recurrenceId", recurrence_id)
}

/// ## Summary
/// Fetches one event by id, decoded.
///
/// ## Errors
/// Returns an error on store failure or if the document doesn't decode.
pub async fn get_event(
    store: &dyn DocumentStore,
    event_id: &str,
) -> StoreResult<Option<Stored<MinyanEvent>>> {
    match store.get(COLLECTION, event_id).await? {
        Some(doc) => Ok(Some(doc.decode_stored()?)),
        None => Ok(None),
    }
}

/// ## Summary
/// Lists a building's events, optionally restricted to one date.
///
/// ## Errors
/// Returns an error on store failure or if a document doesn't decode.
pub async fn list_for_building(
    store: &dyn DocumentStore,
    building_id: &str,
    date: Option<NaiveDate>,
) -> StoreResult<Vec<Stored<MinyanEvent>>> {
    let query = match date {
        Some(date) => for_building_on(building_id, date),
        None => for_building(building_id),
    };
    let docs = store.find(query).await?;
    decode_all(&docs)
}

/// ## Summary
/// Lists every event tagged with a recurrence id.
///
/// ## Errors
/// Returns an error on store failure or if a document doesn't decode.
pub async fn list_by_recurrence(
    store: &dyn DocumentStore,
    recurrence_id: &str,
) -> StoreResult<Vec<Stored<MinyanEvent>>> {
    let docs = store.find(by_recurrence(recurrence_id)).await?;
    decode_all(&docs)
}
