use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use minyan_service::announcement::{broadcast_announcement, create_announcement};

use super::ErrorResponse;
use crate::gateway_handler::get_gateways_from_depot;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementPayload {
    pub building_id: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    /// When set, fan the announcement out over the configured gateways.
    #[serde(default)]
    pub broadcast: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementResponse {
    pub announcement_id: String,
    pub push_success: u32,
    pub push_failure: u32,
    pub whatsapp_sent: u32,
    pub whatsapp_failed: u32,
}

/// ## Summary
/// POST /api/app/announcements - Persist an announcement, optionally
/// broadcasting it to the building's opted-in members. Gateway failures are
/// tallied in the response, never retried, and never fail the request once
/// the announcement is stored.
///
/// ## Errors
/// Returns HTTP 400 on a malformed or incomplete body
/// Returns HTTP 500 if persistence fails
#[handler]
async fn create_announcement_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: AnnouncementPayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse announcement request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new("Invalid request body")));
            return;
        }
    };

    if payload.title.is_empty() || payload.message.is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Title and message are required")));
        return;
    }

    let store = match get_store_from_depot(depot) {
        Ok(s) => s,
        Err(e) => {
            error!(error = ?e, "Failed to get store client");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Internal server error")));
            return;
        }
    };

    let announcement_id = match create_announcement(
        store.as_ref(),
        &payload.building_id,
        &payload.title,
        &payload.message,
        &payload.created_by,
    )
    .await
    {
        Ok(id) => id,
        Err(e) => {
            error!(error = ?e, "Failed to create announcement");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to create announcement")));
            return;
        }
    };

    let mut response = AnnouncementResponse {
        announcement_id,
        push_success: 0,
        push_failure: 0,
        whatsapp_sent: 0,
        whatsapp_failed: 0,
    };

    if payload.broadcast {
        let gateways = get_gateways_from_depot(depot);
        match broadcast_announcement(
            store.as_ref(),
            gateways.push.as_ref(),
            gateways.whatsapp.as_ref(),
            &payload.building_id,
            &payload.title,
            &payload.message,
        )
        .await
        {
            Ok(report) => {
                response.push_success = report.push_success;
                response.push_failure = report.push_failure;
                response.whatsapp_sent = report.whatsapp_sent;
                response.whatsapp_failed = report.whatsapp_failed;
            }
            Err(e) => {
                // Announcement is already stored; the broadcast is best
                // effort.
                error!(error = ?e, "Announcement broadcast failed");
            }
        }
    }

    res.status_code(StatusCode::CREATED);
    res.render(Json(response));
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("announcements").post(create_announcement_handler)
}
