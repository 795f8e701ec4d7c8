//! Role and status enums shared by the session and data layers.
//!
//! Wire spellings follow the platform backend: roles are
//! `SCREAMING_SNAKE_CASE`, entity statuses are `snake_case`.

use serde::{Deserialize, Serialize};

/// Implements `Display` and `FromStr` using the given wire spellings.
macro_rules! wire_names {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire name of this value, as sent to and received from the backend.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($name) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!(concat!("invalid ", $label, ": {}"), s))
            }
        }
    };
}

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    /// Store-wide staff access (users, withdrawals, courses).
    Admin,
    /// Everything an admin can do plus system settings and admin management.
    SuperAdmin,
}

wire_names!(AdminRole, "admin role", {
    Admin => "ADMIN",
    SuperAdmin => "SUPER_ADMIN",
});

/// Account status of a platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    Banned,
}

wire_names!(UserStatus, "user status", {
    Active => "active",
    Inactive => "inactive",
    Suspended => "suspended",
    Banned => "banned",
});

/// Moderation status of a course submitted to the learning panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CourseStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    /// Sent back to the author with reviewer notes.
    RevisionRequested,
}

wire_names!(CourseStatus, "course status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    RevisionRequested => "revision_requested",
});

/// Lifecycle of an earnings withdrawal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

wire_names!(WithdrawalStatus, "withdrawal status", {
    Pending => "pending",
    Approved => "approved",
    Rejected => "rejected",
    Completed => "completed",
});

/// Category of an admin notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    #[default]
    System,
    Withdrawal,
    Registration,
    Course,
    Security,
}

wire_names!(NotificationKind, "notification kind", {
    System => "system",
    Withdrawal => "withdrawal",
    Registration => "registration",
    Course => "course",
    Security => "security",
});
