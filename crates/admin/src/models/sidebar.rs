//! Badge counts shown next to navigation entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SidebarSummary {
    pub pending_withdrawals: u64,
    pub pending_courses: u64,
    pub unread_notifications: u64,
    /// Sign-ups since the start of the day.
    pub new_users: u64,
}
