mod announcements;
mod attendance;
mod buildings;
mod events;
mod healthcheck;
mod recurrences;

use salvo::Router;
use serde::Serialize;

// Re-export route constants from core
pub use minyan_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, APP_ROUTE_COMPONENT, APP_ROUTE_PREFIX,
};

/// ## Summary
/// Error response payload shared by all handlers.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// ## Summary
/// Constructs the main API router with all handlers.
#[must_use]
pub fn routes() -> Router {
    Router::with_path(API_ROUTE_COMPONENT).push(
        Router::with_path(APP_ROUTE_COMPONENT)
            .push(healthcheck::routes())
            .push(buildings::routes())
            .push(events::routes())
            .push(attendance::routes())
            .push(recurrences::routes())
            .push(announcements::routes()),
    )
}
