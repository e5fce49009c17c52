use chrono::NaiveDate;
use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};
use tracing::error;

use minyan_service::building::{
    CreateBuildingRequest, create_building, join_building, leave_building,
};
use minyan_store::query;

use super::ErrorResponse;
use crate::store_handler::get_store_from_depot;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingPayload {
    pub name: String,
    pub address: String,
    pub admin_user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    pub code: String,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeavePayload {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingResponse {
    pub building_id: String,
    pub name: String,
    pub address: String,
    pub invite_code: String,
}

/// ## Summary
/// POST /api/app/buildings - Create a building with a fresh invite code.
///
/// ## Errors
/// Returns HTTP 400 on a malformed or incomplete body
/// Returns HTTP 500 if persistence fails
#[handler]
async fn create_building_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: CreateBuildingPayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse create building request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse::new("Invalid request body")));
            return;
        }
    };

    if payload.name.is_empty() || payload.admin_user_id.is_empty() {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Name and admin user are required")));
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

    match create_building(
        store.as_ref(),
        &CreateBuildingRequest {
            name: payload.name,
            address: payload.address,
            admin_user_id: payload.admin_user_id,
        },
    )
    .await
    {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(BuildingResponse {
                building_id: created.id,
                name: created.doc.name,
                address: created.doc.address,
                invite_code: created.doc.invite_code,
            }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to create building");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to create building")));
        }
    }
}

/// ## Summary
/// POST /api/app/buildings/join - Resolve an invite code and join.
///
/// ## Errors
/// Returns HTTP 404 if the code matches no building
/// Returns HTTP 500 if persistence fails
#[handler]
async fn join_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let payload: JoinPayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse join request");
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

    match join_building(store.as_ref(), &payload.user_id, &payload.code).await {
        Ok(Some(building)) => {
            res.render(Json(BuildingResponse {
                building_id: building.id,
                name: building.doc.name,
                address: building.doc.address,
                invite_code: building.doc.invite_code,
            }));
        }
        Ok(None) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new("Invite code not recognized")));
        }
        Err(minyan_service::error::ServiceError::NotFound(what)) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new(format!("Not found: {what}"))));
        }
        Err(e) => {
            error!(error = ?e, "Failed to join building");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to join building")));
        }
    }
}

/// ## Summary
/// POST /`api/app/buildings/:building_id/leave` - Drop membership.
///
/// ## Errors
/// Returns HTTP 404 if the user record is missing
/// Returns HTTP 500 if persistence fails
#[handler]
async fn leave_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(building_id) = req.param::<String>("building_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Building ID required")));
        return;
    };

    let payload: LeavePayload = match req.parse_json().await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to parse leave request");
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

    match leave_building(store.as_ref(), &payload.user_id, &building_id).await {
        Ok(()) => {
            res.status_code(StatusCode::NO_CONTENT);
        }
        Err(minyan_service::error::ServiceError::NotFound(what)) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse::new(format!("Not found: {what}"))));
        }
        Err(e) => {
            error!(error = ?e, "Failed to leave building");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to leave building")));
        }
    }
}

/// ## Summary
/// GET /`api/app/buildings/:building_id/events[?date=YYYY-MM-DD]` - List a
/// building's events, ordered by date then time.
///
/// ## Errors
/// Returns HTTP 400 for a malformed date filter
/// Returns HTTP 500 if the query fails
#[handler]
async fn list_events_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(building_id) = req.param::<String>("building_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Building ID required")));
        return;
    };

    let date = match req.query::<String>("date") {
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => Some(date),
            Err(_) => {
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(ErrorResponse::new("Date must be YYYY-MM-DD")));
                return;
            }
        },
        None => None,
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

    match query::events::list_for_building(store.as_ref(), &building_id, date).await {
        Ok(events) => {
            let body: Vec<serde_json::Value> = events
                .into_iter()
                .filter_map(|event| match serde_json::to_value(&event.doc) {
                    Ok(mut value) => {
                        value["id"] = serde_json::Value::String(event.id);
                        Some(value)
                    }
                    Err(e) => {
                        error!(error = ?e, "Failed to serialize event");
                        None
                    }
                })
                .collect();
            res.render(Json(body));
        }
        Err(e) => {
            error!(error = ?e, "Failed to list events");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to list events")));
        }
    }
}

/// ## Summary
/// GET /`api/app/buildings/:building_id/announcements` - Newest first.
///
/// ## Errors
/// Returns HTTP 500 if the query fails
#[handler]
async fn list_announcements_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(building_id) = req.param::<String>("building_id") else {
        res.status_code(StatusCode::BAD_REQUEST);
        res.render(Json(ErrorResponse::new("Building ID required")));
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

    match query::announcements::list_for_building(store.as_ref(), &building_id).await {
        Ok(announcements) => {
            let body: Vec<serde_json::Value> = announcements
                .into_iter()
                .filter_map(|announcement| match serde_json::to_value(&announcement.doc) {
                    Ok(mut value) => {
                        value["id"] = serde_json::Value::String(announcement.id);
                        Some(value)
                    }
                    Err(e) => {
                        error!(error = ?e, "Failed to serialize announcement");
                        None
                    }
                })
                .collect();
            res.render(Json(body));
        }
        Err(e) => {
            error!(error = ?e, "Failed to list announcements");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse::new("Failed to list announcements")));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("buildings")
        .post(create_building_handler)
        .push(Router::with_path("join").post(join_handler))
        .push(Router::with_path("{building_id}/leave").post(leave_handler))
        .push(Router::with_path("{building_id}/events").get(list_events_handler))
        .push(Router::with_path("{building_id}/announcements").get(list_announcements_handler))
}
