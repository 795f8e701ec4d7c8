//! Platform users managed from the console.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::{Amount, Email, UserId, UserStatus};

/// A referral-platform user as listed in the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    pub id: UserId,
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub status: UserStatus,
    /// Code this user shares to refer others.
    pub referral_code: Option<String>,
    /// Referral code of whoever referred this user.
    pub referred_by: Option<String>,
    #[serde(default)]
    pub total_referrals: u64,
    #[serde(default)]
    pub total_earnings: Amount,
    /// Withdrawable balance.
    #[serde(default)]
    pub balance: Amount,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// Page metadata returned with every paged list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::single_page(0, 10)
    }
}

impl Pagination {
    /// Metadata for a single page holding `total` items.
    #[must_use]
    pub fn single_page(total: usize, limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: total as u64,
            total_pages: 1,
        }
    }

    /// Returns `true` if a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// One page of the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPage {
    pub users: Vec<ManagedUser>,
    pub pagination: Pagination,
}

/// Filters for the user directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
    /// Free-text search over name, email and referral code.
    pub search: Option<String>,
    pub status: Option<UserStatus>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
            status: None,
        }
    }
}

impl UserQuery {
    /// Query string pairs; blank searches are omitted.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        pairs
    }
}

/// Payload for creating a user from the console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Referral code to attribute the new user to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
}

/// Partial profile update; unset fields are left unchanged by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserUpdate {
    /// Returns `true` if no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
    }
}
