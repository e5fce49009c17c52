//! Expansion of a weekly recurrence pattern into concrete dated events.

use chrono::{NaiveDate, NaiveTime};

use minyan_core::types::{Nusach, PrayerType, WeekdaySet, weekday_index};
use minyan_store::document::encode;
use minyan_store::model::{event, recurrence};
use minyan_store::serial::now_millis;
use minyan_store::store::{DocumentStore, WriteBatch};

use crate::error::{ServiceError, ServiceResult};

/// A recurrence definition as submitted by an admin: the weekday/date-range
/// rule plus the fixed per-instance template.
#[derive(Debug, Clone)]
pub struct MaterializeRequest {
    pub building_id: String,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    pub time: NaiveTime,
    pub location: String,
    pub weekdays: WeekdaySet,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub created_by: String,
}

impl MaterializeRequest {
    /// ## Summary
    /// Validates the recurrence invariants: non-empty weekday set, indices in
    /// range, start ≤ end. Runs before any persistence; a rejected request
    /// leaves no pattern behind.
    ///
    /// ## Errors
    /// Returns a `ValidationError` describing the violated invariant.
    pub fn validate(&self) -> ServiceResult<()> {
        self.weekdays.validate()?;
        if self.start_date > self.end_date {
            return Err(ServiceError::ValidationError(format!(
                "start date {} is after end date {}",
                self.start_date, self.end_date
            )));
        }
        Ok(())
    }
}

/// Every date in `[start, end]` whose weekday is in the set, ascending.
///
/// Walks one calendar day at a time; both boundaries are included. An empty
/// intersection yields an empty list, which is a valid outcome — there is no
/// holiday or closure logic here, callers encode exclusions via the weekday
/// set itself.
#[must_use]
pub fn expansion_dates(weekdays: &WeekdaySet, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|date| *date <= end)
        .filter(|date| weekdays.contains(weekday_index(*date)))
        .collect()
}

/// ## Summary
/// Materializes a recurrence: persists the pattern record, then creates one
/// event per matching date as a single atomic batch, all tagged with the
/// pattern's id.
///
/// The pattern is written before expansion begins. If the event batch then
/// fails, the store's atomicity guarantees no partial series exists, but the
/// pattern itself remains — a reportable condition requiring manual cleanup,
/// not silently rolled back here.
///
/// ## Errors
/// Returns a `ValidationError` for an empty weekday set or inverted date
/// range (nothing persisted), or a store error if a write fails.
#[tracing::instrument(skip(store, request), fields(
    building_id = %request.building_id,
    prayer_type = %request.prayer_type,
    start = %request.start_date,
    end = %request.end_date,
))]
pub async fn materialize_recurrence(
    store: &dyn DocumentStore,
    request: &MaterializeRequest,
) -> ServiceResult<Vec<String>> {
    request.validate()?;

    let now = now_millis();
    let pattern = recurrence::RecurrencePattern {
        building_id: request.building_id.clone(),
        prayer_type: request.prayer_type,
        nusach: request.nusach,
        time: request.time,
        location: request.location.clone(),
        weekdays: request.weekdays.clone(),
        start_date: request.start_date,
        end_date: request.end_date,
        created_by: request.created_by.clone(),
        created_at: now,
    };
    let recurrence_id = store
        .add(recurrence::COLLECTION, encode(&pattern)?)
        .await?;

    tracing::debug!(recurrence_id = %recurrence_id, "Recurrence pattern persisted");

    let dates = expansion_dates(&request.weekdays, request.start_date, request.end_date);

    let mut batch = WriteBatch::new();
    let mut event_ids = Vec::with_capacity(dates.len());
    for date in dates {
        let event_id = uuid::Uuid::new_v4().simple().to_string();
        let instance = event::MinyanEvent {
            building_id: request.building_id.clone(),
            date,
            time: request.time,
            prayer_type: request.prayer_type,
            nusach: request.nusach,
            location: request.location.clone(),
            recurrence_id: Some(recurrence_id.clone()),
            is_cancelled: false,
            notes: None,
            created_by: request.created_by.clone(),
            created_at: now,
            updated_at: now,
        };
        batch.set(event::COLLECTION, event_id.clone(), encode(&instance)?);
        event_ids.push(event_id);
    }

    let count = batch.len();
    store.commit(batch).await?;

    tracing::info!(
        recurrence_id = %recurrence_id,
        events = count,
        "Recurrence materialized"
    );

    Ok(event_ids)
}
