//! Series lifecycle: tying materialized events back to their pattern for
//! bulk deletion.

use minyan_store::model::{attendance, event, recurrence};
use minyan_store::query;
use minyan_store::store::{DocumentStore, WriteBatch};

use crate::error::ServiceResult;

/// ## Summary
/// Deletes every event materialized from a recurrence pattern, the pattern
/// itself, and the attendance records of those events, as one atomic batch.
/// Either the whole series disappears or (on failure) none of it does.
///
/// Attendance cleanup cascades here rather than leaving orphans behind; the
/// records are unreachable once their event is gone.
///
/// Unknown recurrence ids are tolerated: deleting an absent pattern is a
/// no-op, matching the store's delete semantics.
///
/// ## Errors
/// Returns a store error if the lookup or the batch commit fails.
#[tracing::instrument(skip(store))]
pub async fn delete_series(store: &dyn DocumentStore, recurrence_id: &str) -> ServiceResult<()> {
    let events = store.find(query::events::by_recurrence(recurrence_id)).await?;

    let mut batch = WriteBatch::new();
    for event_doc in &events {
        let rsvps = store
            .find(query::attendance::for_event(&event_doc.id))
            .await?;
        for rsvp in rsvps {
            batch.delete(attendance::COLLECTION, rsvp.id);
        }
        batch.delete(event::COLLECTION, event_doc.id.clone());
    }
    batch.delete(recurrence::COLLECTION, recurrence_id);

    let removed = batch.len();
    store.commit(batch).await?;

    tracing::info!(
        recurrence_id,
        events = events.len(),
        documents = removed,
        "Recurrence series deleted"
    );
    Ok(())
}
