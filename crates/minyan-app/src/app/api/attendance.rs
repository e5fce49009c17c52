use std::convert::Infallible;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use salvo::sse::{SseEvent, SseKeepAlive};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::error;

use minyan_core::types::RsvpStatus;
use minyan_service::minyan::attendance::{
    AttendanceSummary, attendance_summary, set_attendance, subscribe_attendance,
};
use minyan_service::minyan::quorum::QuorumPolicy;
use minyan_store::query;
use minyan_store::store::{DocumentStore, StoreHandle, Subscription};

use super::ErrorResponse;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpPayload {
    pub user_id: String,
    pub user_name: String,
    pub status: RsvpStatus,
}

/// Live summary feed. Holds the store subscription so the watch is torn down
/// when the client disconnects and the stream drops.
struct SummaryStream {
    rx: mpsc::UnboundedReceiver<AttendanceSummary>,
    _guard: Subscription,
}

impl Stream for SummaryStream {
    type Item = Result<SseEvent, Infallible>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(summary)) => {
                let event = match serde_json::to_string(&summary) {
                    Ok(body) => SseEvent::default().name("summary").text(body),
                    Err(e) => {
                        error!(error = %e, "Failed to serialize attendance summary");
                        SseEvent::default().name("error").text("serialization failed")
                    }
                };
                Poll::Ready(Some(Ok(event)))
            }
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Quorum policy for an event, honoring its building's threshold override.
/// A missing event resolves to `Ok(None)`.
async fn policy_for_event(
    store: &dyn DocumentStore,
    event_id: &str,
) -> Result<Option<QuorumPolicy>, minyan_store::error::StoreError> {
    let Some(event) = query::events::get_event(store, event_id).await? else {
        return Ok(None);
    };
    let policy = match query::buildings::get_building(store, &event.doc.building_id).await? {
        Some(building) => QuorumPolicy::for_building(&building.doc),
        None => QuorumPolicy::default(),
    };
    Ok(Some(policy))
}

/// ## Summary
/// PUT /`api/app/events/:event_id/attendance` - Upsert the caller's RSVP,
/// then return the refreshed summary.
///
/// ## Errors
/// Returns HTTP 400 on a malformed body
/// Returns HTTP 404 if the event doesn't exist
/// Returns HTTP 500 if persistence fails
#[handler]
async fn set_attendance_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(event_id) = req.param::<String>("event_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Event ID required")));
        return;
    };

    let payload: RsvpPayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse RSVP request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new("Invalid request body")));
            return;
        }
    };

    let store = match get_store_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get store client");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Internal server error")));
            return;
        }
    };

    let policy = match policy_for_event(store.as_ref(), &event_id).await {
        Ok(Some(policy)) => policy,
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new("Event not found")));
            return;
        }
        Err(e) => {
            error!(error = ?e, "Failed to load event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to load event")));
            return;
        }
    };

    if let Err(e) = set_attendance(
        store.as_ref(),
        &event_id,
        &payload.user_id,
        &payload.user_name,
        payload.status,
    )
    .await
    {
        error!(error = ?e, "Failed to record RSVP");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        res.render(Json(ErrorResponse::new("Failed to record RSVP")));
        return;
    }

    match attendance_summary(store.as_ref(), &event_id, policy).await {
        Ok(summary) => {
            res.render(Json(summary));
        }
        Err(e) => {
            error!(error = ?e, "Failed to compute attendance summary");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to compute summary")));
        }
    }
}

/// ## Summary
/// GET /`api/app/events/:event_id/attendance` - Current summary snapshot.
///
/// ## Errors
/// Returns HTTP 404 if the event doesn't exist
/// Returns HTTP 500 if the query fails
#[handler]
async fn get_summary_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(event_id) = req.param::<String>("event_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Event ID required")));
        return;
    };

    let store = match get_store_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get store client");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Internal server error")));
            return;
        }
    };

    let policy = match policy_for_event(store.as_ref(), &event_id).await {
        Ok(Some(policy)) => policy,
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new("Event not found")));
            return;
        }
        Err(e) => {
            error!(error = ?e, "Failed to load event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to load event")));
            return;
        }
    };

    match attendance_summary(store.as_ref(), &event_id, policy).await {
        Ok(summary) => {
            res.render(Json(summary));
        }
        Err(e) => {
            error!(error = ?e, "Failed to compute attendance summary");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to compute summary")));
        }
    }
}

/// ## Summary
/// GET /`api/app/events/:event_id/attendance/live` - Server-sent summary
/// feed. Emits the current summary immediately, then one `summary` event per
/// RSVP change, until the client disconnects.
///
/// ## Errors
/// Returns HTTP 404 if the event doesn't exist
/// Returns HTTP 500 if the watch can't be established
#[handler]
async fn live_summary_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(event_id) = req.param::<String>("event_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Event ID required")));
        return;
    };

    let store: StoreHandle = match get_store_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get store client");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Internal server error")));
            return;
        }
    };

    let policy = match policy_for_event(store.as_ref(), &event_id).await {
        Ok(Some(policy)) => policy,
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new("Event not found")));
            return;
        }
        Err(e) => {
            error!(error = ?e, "Failed to load event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to load event")));
            return;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let guard = subscribe_attendance(store.as_ref(), &event_id, policy, move |summary| {
        // A closed receiver means the client went away; the guard drop
        // tears the watch down.
        let _ = tx.send(summary);
    });

    let stream = SummaryStream { rx, _guard: guard };
    SseKeepAlive::new(stream).stream(res);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events/{event_id}/attendance")
        .put(set_attendance_handler)
        .get(get_summary_handler)
        .push(Router::with_path("live").get(live_summary_handler))
}
