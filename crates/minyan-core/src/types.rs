use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Prayer service slot within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerType {
    Shacharis,
    Mincha,
    Maariv,
}

impl PrayerType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shacharis => "Shacharis",
            Self::Mincha => "Mincha",
            Self::Maariv => "Maariv",
        }
    }
}

impl std::fmt::Display for PrayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prayer-rite variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nusach {
    Ashkenaz,
    Sefard,
    #[serde(rename = "Eidot Mizrach")]
    EidotMizrach,
}

impl Nusach {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ashkenaz => "Ashkenaz",
            Self::Sefard => "Sefard",
            Self::EidotMizrach => "Eidot Mizrach",
        }
    }
}

impl std::fmt::Display for Nusach {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's declared intent to attend an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RsvpStatus {
    Yes,
    Maybe,
    No,
}

impl RsvpStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }
}

impl std::fmt::Display for RsvpStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Member,
    Admin,
    Superadmin,
}

/// Set of weekday indices, 0 = Sunday through 6 = Saturday.
///
/// Serialized as a plain array of numbers, matching the stored document
/// format. Order and duplicates in the input are tolerated; membership is
/// what matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdaySet(Vec<u8>);

impl WeekdaySet {
    #[must_use]
    pub fn new(days: Vec<u8>) -> Self {
        Self(days)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, weekday: u8) -> bool {
        self.0.contains(&weekday)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// ## Summary
    /// Checks that the set is non-empty and every index lies in 0..=6.
    ///
    /// ## Errors
    /// Returns a `ValidationError` describing the first violation found.
    pub fn validate(&self) -> CoreResult<()> {
        if self.0.is_empty() {
            return Err(CoreError::ValidationError(
                "weekday set must not be empty".to_string(),
            ));
        }
        if let Some(bad) = self.0.iter().find(|d| **d > 6) {
            return Err(CoreError::ValidationError(format!(
                "weekday index out of range: {bad}"
            )));
        }
        Ok(())
    }
}

impl From<Vec<u8>> for WeekdaySet {
    fn from(days: Vec<u8>) -> Self {
        Self(days)
    }
}

/// Weekday index of a calendar date, 0 = Sunday.
#[must_use]
pub fn weekday_index(date: NaiveDate) -> u8 {
    // num_days_from_sunday is already the 0=Sunday convention
    u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(0)
}
