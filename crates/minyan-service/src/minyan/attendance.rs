//! Live attendance aggregation: RSVP upserts and per-event summaries pushed
//! to every active viewer.

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, json};

use minyan_core::types::RsvpStatus;
use minyan_store::document::{Document, Stored, encode};
use minyan_store::model::attendance::{Attendance, COLLECTION};
use minyan_store::query;
use minyan_store::serial::now_millis;
use minyan_store::store::{DocumentStore, Subscription};

use crate::error::ServiceResult;
use crate::minyan::quorum::QuorumPolicy;

/// One roster entry in a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: String,
    pub name: String,
    pub status: RsvpStatus,
}

/// Derived view over an event's RSVP records. Never persisted; recomputed
/// from scratch on every read and every change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub event_id: String,
    pub yes_count: u32,
    pub maybe_count: u32,
    pub no_count: u32,
    pub has_minyan: bool,
    /// No guaranteed order; consumers sort client-side if they need one.
    pub attendees: Vec<Attendee>,
}

/// Partition the records by status and apply the quorum policy.
#[must_use]
pub fn summarize(
    event_id: &str,
    records: &[Stored<Attendance>],
    policy: QuorumPolicy,
) -> AttendanceSummary {
    let count_status = |status: RsvpStatus| {
        u32::try_from(
            records
                .iter()
                .filter(|record| record.doc.status == status)
                .count(),
        )
        .unwrap_or(u32::MAX)
    };

    let yes_count = count_status(RsvpStatus::Yes);
    AttendanceSummary {
        event_id: event_id.to_string(),
        yes_count,
        maybe_count: count_status(RsvpStatus::Maybe),
        no_count: count_status(RsvpStatus::No),
        has_minyan: policy.has_minyan(yes_count),
        attendees: records
            .iter()
            .map(|record| Attendee {
                id: record.doc.user_id.clone(),
                name: record.doc.user_name.clone(),
                status: record.doc.status,
            })
            .collect(),
    }
}

/// ## Summary
/// Idempotent RSVP upsert: overwrites the status of the existing
/// (user, event) record or creates one. Last writer wins per pair; each pair
/// is logically owned by its one user.
///
/// ## Errors
/// Returns a store error if the read or write fails.
#[tracing::instrument(skip(store, user_name), fields(event_id, user_id, status = %status))]
pub async fn set_attendance(
    store: &dyn DocumentStore,
    event_id: &str,
    user_id: &str,
    user_name: &str,
    status: RsvpStatus,
) -> ServiceResult<()> {
    let existing = query::attendance::find_for_user(store, event_id, user_id).await?;
    let now = now_millis();

    match existing {
        Some(record) => {
            let mut patch = Map::new();
            patch.insert("status".to_string(), json!(status));
            patch.insert("updatedAt".to_string(), json!(now));
            store.update(COLLECTION, &record.id, patch).await?;
            tracing::debug!(record_id = %record.id, "RSVP updated");
        }
        None => {
            let record = Attendance {
                user_id: user_id.to_string(),
                user_name: user_name.to_string(),
                minyan_event_id: event_id.to_string(),
                status,
                created_at: now,
                updated_at: now,
            };
            let record_id = store.add(COLLECTION, encode(&record)?).await?;
            tracing::debug!(record_id = %record_id, "RSVP created");
        }
    }
    Ok(())
}

/// ## Summary
/// Computes the current summary for an event.
///
/// ## Errors
/// Returns a store error if the query fails or a record doesn't decode.
pub async fn attendance_summary(
    store: &dyn DocumentStore,
    event_id: &str,
    policy: QuorumPolicy,
) -> ServiceResult<AttendanceSummary> {
    let records = query::attendance::list_for_event(store, event_id).await?;
    Ok(summarize(event_id, &records, policy))
}

/// ## Summary
/// Registers a live summary feed for an event. The callback fires once
/// immediately with current state, then after every RSVP create or update
/// for the event, until the returned guard is dropped or unsubscribed.
///
/// Summaries are recomputed in full per notification rather than maintained
/// incrementally; rosters are tens of people, not thousands. Many
/// independent subscribers per event are supported, with no delivery-order
/// guarantee between them.
pub fn subscribe_attendance(
    store: &dyn DocumentStore,
    event_id: &str,
    policy: QuorumPolicy,
    callback: impl Fn(AttendanceSummary) + Send + Sync + 'static,
) -> Subscription {
    let event_id = event_id.to_string();
    store.watch(
        query::attendance::for_event(&event_id),
        Arc::new(move |docs: &[Document]| {
            let records: Vec<Stored<Attendance>> = docs
                .iter()
                .filter_map(|doc| match doc.decode_stored() {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::error!(error = %e, id = %doc.id, "Undecodable attendance record skipped");
                        None
                    }
                })
                .collect();
            callback(summarize(&event_id, &records, policy));
        }),
    )
}
