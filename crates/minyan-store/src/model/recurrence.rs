use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use minyan_core::types::{Nusach, PrayerType, WeekdaySet};

pub const COLLECTION: &str = "recurrencePatterns";

/// A weekday/date-range rule plus per-instance template used to generate
/// multiple concrete events. Immutable after creation; removed only through
/// the series-delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePattern {
    pub building_id: String,
    pub prayer_type: PrayerType,
    pub nusach: Nusach,
    #[serde(with = "crate::serial::hhmm")]
    pub time: NaiveTime,
    pub location: String,
    /// Weekday indices 0..=6, 0 = Sunday. Non-empty; validated before any
    /// persistence.
    pub weekdays: WeekdaySet,
    pub start_date: NaiveDate,
    /// Inclusive.
    pub end_date: NaiveDate,
    pub created_by: String,
    pub created_at: i64,
}
