use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "announcements";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub building_id: String,
    pub title: String,
    pub message: String,
    pub created_by: String,
    pub created_at: i64,
}
