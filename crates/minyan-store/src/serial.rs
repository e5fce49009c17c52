//! Serialization contract for stored values.
//!
//! Calendar dates are ISO-8601 date-only strings ("YYYY-MM-DD", chrono's
//! `NaiveDate` default), times of day are "HH:mm" strings, and created/updated
//! instants are epoch milliseconds. Nothing in the store performs timezone
//! conversion; a date is an opaque calendar key.

use chrono::Utc;

/// Current instant as epoch milliseconds, the stored timestamp format.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Serde adapter for "HH:mm" time-of-day strings.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    const FORMAT: &str = "%H:%M";

    /// ## Errors
    /// Returns a serializer error if the underlying writer fails.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    /// ## Errors
    /// Returns a deserializer error if the value is not an "HH:mm" string.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, FORMAT).map_err(D::Error::custom)
    }
}
