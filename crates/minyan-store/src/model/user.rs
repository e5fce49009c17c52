use serde::{Deserialize, Serialize};

use minyan_core::types::{Nusach, PrayerType, UserRole};

pub const COLLECTION: &str = "users";

/// How and when a user wants to be reminded about sessions. The reminder
/// scheduling itself lives outside this system; only the preference data is
/// stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    pub push: bool,
    pub whatsapp: bool,
    pub email: bool,
    /// Minutes before the event.
    pub reminder_minutes: u32,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            push: true,
            whatsapp: false,
            email: false,
            reminder_minutes: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Building membership is this reference list; joining and leaving
    /// mutate it in place.
    #[serde(default)]
    pub building_ids: Vec<String>,
    pub role: UserRole,
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
    #[serde(default)]
    pub push_token: Option<String>,
    #[serde(default)]
    pub whatsapp_opt_in: bool,
    #[serde(default)]
    pub preferred_prayers: Vec<PrayerType>,
    #[serde(default)]
    pub preferred_nusach: Option<Nusach>,
    pub created_at: i64,
    pub updated_at: i64,
}
