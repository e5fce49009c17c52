//! Single-event operations and the live event-list feed.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, json};

use minyan_core::types::{Nusach, PrayerType};
use minyan_store::document::{Document, Stored, encode};
use minyan_store::model::event::{COLLECTION, MinyanEvent};
use minyan_store::query;
use minyan_store::serial::now_millis;
use minyan_store::store::{DocumentStore, Subscription};

use crate::error::ServiceResult;

/// A directly created (non-recurring) session.
#[derive(Debug, Clone)]
pub struct CreateEventRequest {
    pub building_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    pub location: String,
    pub notes: Option<String>,
    pub created_by: String,
}

/// ## Summary
/// Creates one event with no recurrence back-reference, returning its id.
///
/// ## Errors
/// Returns a store error if the write fails.
#[tracing::instrument(skip(store, request), fields(
    building_id = %request.building_id,
    date = %request.date,
))]
pub async fn create_event(
    store: &dyn DocumentStore,
    request: &CreateEventRequest,
) -> ServiceResult<String> {
    let now = now_millis();
    let event = MinyanEvent {
        building_id: request.building_id.clone(),
        date: request.date,
        time: request.time,
        prayer_type: request.prayer_type,
        nusach: request.nusach,
        location: request.location.clone(),
        recurrence_id: None,
        is_cancelled: false,
        notes: request.notes.clone(),
        created_by: request.created_by.clone(),
        created_at: now,
        updated_at: now,
    };
    let event_id = store.add(COLLECTION, encode(&event)?).await?;
    tracing::info!(event_id = %event_id, "Event created");
    Ok(event_id)
}

/// ## Summary
/// Marks an event cancelled. The record stays so viewers see the
/// cancellation instead of an event silently vanishing.
///
/// ## Errors
/// Returns a store error; a missing event surfaces as the store's missing-
/// document error.
#[tracing::instrument(skip(store))]
pub async fn cancel_event(store: &dyn DocumentStore, event_id: &str) -> ServiceResult<()> {
    let mut patch = Map::new();
    patch.insert("isCancelled".to_string(), json!(true));
    patch.insert("updatedAt".to_string(), json!(now_millis()));
    store.update(COLLECTION, event_id, patch).await?;
    tracing::info!(event_id, "Event cancelled");
    Ok(())
}

/// ## Summary
/// Deletes one event record.
///
/// ## Errors
/// Returns a store error if the delete fails.
#[tracing::instrument(skip(store))]
pub async fn delete_event(store: &dyn DocumentStore, event_id: &str) -> ServiceResult<()> {
    store.delete(COLLECTION, event_id).await?;
    tracing::info!(event_id, "Event deleted");
    Ok(())
}

/// ## Summary
/// Registers a live feed over a building's events for one date, ordered by
/// time. Fires immediately with current state, then on every event change
/// in that building/date slice, until the guard is dropped.
pub fn subscribe_events(
    store: &dyn DocumentStore,
    building_id: &str,
    date: NaiveDate,
    callback: impl Fn(Vec<Stored<MinyanEvent>>) + Send + Sync + 'static,
) -> Subscription {
    store.watch(
        query::events::for_building_on(building_id, date),
        Arc::new(move |docs: &[Document]| {
            let events: Vec<Stored<MinyanEvent>> = docs
                .iter()
                .filter_map(|doc| match doc.decode_stored() {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::error!(error = %e, id = %doc.id, "Undecodable event skipped");
                        None
                    }
                })
                .collect();
            callback(events);
        }),
    )
}
