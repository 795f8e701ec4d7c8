//! Dashboard summary statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::Amount;

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub active_users: u64,
    pub new_users_today: u64,
    pub total_referrals: u64,
    /// Lifetime earnings credited to users.
    pub total_earnings: Amount,
    pub pending_withdrawals: u64,
    pub pending_withdrawal_amount: Amount,
    pub active_courses: u64,
    pub recent_activity: Vec<ActivityItem>,
}

/// One row of the "recent activity" feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    pub id: String,
    /// Free-form category such as `registration` or `withdrawal`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

impl DashboardStats {
    /// Share of users active in the current period, in percent.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // user counts stay far below 2^52
    pub fn active_ratio(&self) -> f64 {
        if self.total_users == 0 {
            return 0.0;
        }
        self.active_users as f64 / self.total_users as f64 * 100.0
    }
}
