use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use minyan_core::types::{Nusach, PrayerType};

pub const COLLECTION: &str = "minyanEvents";

/// One concrete scheduled session.
///
/// `date` is an opaque calendar key; no timezone conversion happens anywhere.
/// `recurrence_id` back-references the pattern that materialized this event,
/// absent for directly created singles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinyanEvent {
    pub building_id: String,
    pub date: NaiveDate,
    #[serde(with = "crate::serial::hhmm")]
    pub time: NaiveTime,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    pub location: String,
    #[serde(default)]
    pub recurrence_id: Option<String>,
    #[serde(default)]
    pub is_cancelled: bool,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_by: String,
    pub created_at: i64,
    pub updated_at: i64,
}
