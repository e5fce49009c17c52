use chrono::{NaiveDate, NaiveTime};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use minyan_core::types::{Nusach, PrayerType};
use minyan_service::minyan::events::{
    CreateEventRequest, cancel_event, create_event, delete_event,
};
use minyan_store::error::StoreError;

use super::ErrorResponse;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventPayload {
    pub building_id: String,
    pub date: NaiveDate,
    #[serde(with = "minyan_store::serial::hhmm")]
    pub time: NaiveTime,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    pub location: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedEventResponse {
    pub event_id: String,
}

/// ## Summary
/// POST /api/app/events - Create a single, non-recurring event.
///
/// ## Errors
/// Returns HTTP 400 on a malformed body
/// Returns HTTP 500 if persistence fails
#[handler]
async fn create_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: CreateEventPayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse create event request");
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

    let request = CreateEventRequest {
        building_id: payload.building_id,
        date: payload.date,
        time: payload.time,
        prayer_type: payload.prayer_type,
        nusach: payload.nusach,
        location: payload.location,
        notes: payload.notes,
        created_by: payload.created_by,
    };

    match create_event(store.as_ref(), &request).await {
        Ok(event_id) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(CreatedEventResponse { event_id }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to create event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to create event")));
        }
    }
}

/// ## Summary
/// POST /`api/app/events/:event_id/cancel` - Mark an event cancelled while
/// keeping its record visible.
///
/// ## Errors
/// Returns HTTP 404 if the event doesn't exist
/// Returns HTTP 500 if persistence fails
#[handler]
async fn cancel_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
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

    match cancel_event(store.as_ref(), &event_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(minyan_service::error::ServiceError::StoreError(StoreError::Missing {
            ..
        })) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new("Event not found")));
        }
        Err(e) => {
            error!(error = ?e, "Failed to cancel event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to cancel event")));
        }
    }
}

/// ## Summary
/// DELETE /`api/app/events/:event_id` - Remove a single event outright.
///
/// ## Errors
/// Returns HTTP 500 if persistence fails
#[handler]
async fn delete_event_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
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

    match delete_event(store.as_ref(), &event_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => {
            error!(error = ?e, "Failed to delete event");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to delete event")));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("events")
        .post(create_event_handler)
        .push(Router::with_path("{event_id}/cancel").post(cancel_event_handler))
        .push(Router::with_path("{event_id}").delete(delete_event_handler))
}
