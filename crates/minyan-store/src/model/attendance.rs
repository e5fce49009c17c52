use serde::{Deserialize, Serialize};

use minyan_core::types::RsvpStatus;

pub const COLLECTION: &str = "attendance";

/// One user's RSVP to one event. At most one record exists per
/// (user, event) pair; repeat RSVPs overwrite in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub user_id: String,
    /// Denormalized so the roster renders without a user lookup.
    pub user_name: String,
    pub minyan_event_id: String,
    pub status: RsvpStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
