//! Authenticated admin identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::{AdminId, AdminRole, Email};

/// Profile of the signed-in staff member, as returned by login and verify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminIdentity {
    /// Backend admin ID.
    pub id: AdminId,
    /// Login email.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    /// Permission level.
    pub role: AdminRole,
    /// Fine-grained permission names (e.g. `withdrawals:approve`).
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

const fn default_active() -> bool {
    true
}

impl AdminIdentity {
    /// "First Last", falling back to the email when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.email.to_string()
        } else {
            name.to_string()
        }
    }

    /// Returns `true` for the `SUPER_ADMIN` role.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == AdminRole::SuperAdmin
    }

    /// Super admins implicitly hold every permission.
    #[must_use]
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_super_admin() || self.permissions.iter().any(|p| p == permission)
    }
}
