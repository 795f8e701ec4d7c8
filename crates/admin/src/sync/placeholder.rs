//! Placeholder data served before the first fetch and in mock mode.
//!
//! Fixtures are stored in the backend's wire format so they exercise the same
//! decoding path as live responses.

use serde::de::DeserializeOwned;
use tracing::error;

use crate::models::{
    Analytics, CourseList, DashboardStats, FinancialOverview, NotificationFeed, SidebarSummary,
    SystemSettings, UserPage, WithdrawalPage,
};

const DASHBOARD: &str = include_str!("placeholder/dashboard.json");
const USERS: &str = include_str!("placeholder/users.json");
const NOTIFICATIONS: &str = include_str!("placeholder/notifications.json");
const COURSES: &str = include_str!("placeholder/courses.json");
const FINANCIAL: &str = include_str!("placeholder/financial.json");
const WITHDRAWALS: &str = include_str!("placeholder/withdrawals.json");
const ANALYTICS: &str = include_str!("placeholder/analytics.json");
const SETTINGS: &str = include_str!("placeholder/settings.json");
const SIDEBAR: &str = include_str!("placeholder/sidebar.json");

/// Decode a fixture, falling back to the type's empty value.
fn decode<T: DeserializeOwned + Default>(name: &str, raw: &str) -> T {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        error!(fixture = name, error = %e, "Placeholder fixture does not decode");
        T::default()
    })
}

pub(crate) fn dashboard() -> DashboardStats {
    decode("dashboard", DASHBOARD)
}

pub(crate) fn users() -> UserPage {
    decode("users", USERS)
}

pub(crate) fn notifications() -> NotificationFeed {
    let mut feed: NotificationFeed = decode("notifications", NOTIFICATIONS);
    feed.recount();
    feed
}

pub(crate) fn courses() -> CourseList {
    decode("courses", COURSES)
}

pub(crate) fn financial() -> FinancialOverview {
    decode("financial", FINANCIAL)
}

pub(crate) fn withdrawals() -> WithdrawalPage {
    decode("withdrawals", WITHDRAWALS)
}

pub(crate) fn analytics() -> Analytics {
    decode("analytics", ANALYTICS)
}

pub(crate) fn settings() -> SystemSettings {
    decode("settings", SETTINGS)
}

pub(crate) fn sidebar() -> SidebarSummary {
    decode("sidebar", SIDEBAR)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ybs_core::{CourseStatus, UserStatus};

    // Decode strictly so a broken fixture fails here instead of silently
    // degrading to an empty value.
    fn strict<T: DeserializeOwned>(raw: &str) -> T {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_every_fixture_decodes() {
        let stats: DashboardStats = strict(DASHBOARD);
        assert_eq!(stats.total_users, 1248);
        assert_eq!(stats.recent_activity.len(), 3);

        let users: UserPage = strict(USERS);
        assert_eq!(users.users.len(), 3);
        assert_eq!(users.pagination.total, 3);
        assert_eq!(users.users[2].status, UserStatus::Suspended);

        let courses: CourseList = strict(COURSES);
        assert_eq!(courses.count(CourseStatus::Pending), 1);

        let _: NotificationFeed = strict(NOTIFICATIONS);
        let _: FinancialOverview = strict(FINANCIAL);
        let _: WithdrawalPage = strict(WITHDRAWALS);
        let _: Analytics = strict(ANALYTICS);
        let _: SystemSettings = strict(SETTINGS);
        let _: SidebarSummary = strict(SIDEBAR);
    }

    #[test]
    fn test_notification_placeholder_count_matches_list() {
        let feed = notifications();
        assert_eq!(feed.unread_count, 2);
        assert_eq!(
            feed.unread_count,
            feed.notifications.iter().filter(|n| !n.is_read).count() as u64
        );
    }

    #[test]
    fn test_placeholders_are_not_empty() {
        assert!(!withdrawals().withdrawals.is_empty());
        assert!(!analytics().top_referrers.is_empty());
        assert_eq!(settings().platform_name, "YBS");
        assert_eq!(sidebar().unread_notifications, 2);
        assert!(financial().total_revenue.is_positive());
    }
}
