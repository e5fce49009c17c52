use chrono::{NaiveDate, NaiveTime};
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use minyan_core::types::{Nusach, PrayerType, WeekdaySet};
use minyan_service::error::ServiceError;
use minyan_service::minyan::lifecycle::delete_series;
use minyan_service::minyan::materializer::{MaterializeRequest, materialize_recurrence};

use super::ErrorResponse;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializePayload {
    pub building_id: String,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    #[serde(with = "minyan_store::serial::hhmm")]
    pub time: NaiveTime,
    pub location: String,
    pub weekdays: WeekdaySet,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_by: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterializeResponse {
    pub event_ids: Vec<String>,
    pub event_count: usize,
}

/// ## Summary
/// POST /api/app/recurrences - Expand a weekly pattern into dated events.
/// Validation failures happen before anything is written.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, an empty weekday set, an
/// out-of-range weekday index, or an inverted date range
/// Returns HTTP 500 if persistence fails
#[handler]
async fn materialize_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: MaterializePayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse recurrence request");
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

    let request = MaterializeRequest {
        building_id: payload.building_id,
        prayer_type: payload.prayer_type,
        nusach: payload.nusach,
        time: payload.time,
        location: payload.location,
        weekdays: payload.weekdays,
        start_date: payload.start_date,
        end_date: payload.end_date,
        created_by: payload.created_by,
    };

    match materialize_recurrence(store.as_ref(), &request).await {
        Ok(event_ids) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(MaterializeResponse {
                event_count: event_ids.len(),
                event_ids,
            }));
        }
        Err(ServiceError::ValidationError(message)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new(message)));
        }
        Err(ServiceError::CoreError(e)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new(e.to_string())));
        }
        Err(e) => {
            error!(error = ?e, "Failed to materialize recurrence");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to materialize recurrence")));
        }
    }
}

/// ## Summary
/// DELETE /`api/app/recurrences/:recurrence_id` - Remove the pattern, its
/// events, and their attendance in one batch. Unknown ids are a no-op.
///
/// ## Errors
/// Returns HTTP 500 if the batch commit fails
#[handler]
async fn delete_series_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(recurrence_id) = req.param::<String>("recurrence_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Recurrence ID required")));
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

    match delete_series(store.as_ref(), &recurrence_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(e) => {
            error!(error = ?e, "Failed to delete recurrence series");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to delete series")));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("recurrences")
        .post(materialize_handler)
        .push(Router::with_path("{recurrence_id}").delete(delete_series_handler))
}
