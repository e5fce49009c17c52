use serde::{Deserialize, Serialize};

pub const COLLECTION: &str = "buildings";

/// A tenant/organizational unit grouping users, events, and announcements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub name: String,
    pub address: String,
    pub invite_code: String,
    pub admin_user_ids: Vec<String>,
    /// Overrides the default minyan threshold for this building when set.
    #[serde(default)]
    pub quorum_threshold: Option<u32>,
    pub created_at: i64,
    pub updated_at: i64,
}
