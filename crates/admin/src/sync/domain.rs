//! The eight data domains and the trait that ties a payload type to one.

use serde::de::DeserializeOwned;

use crate::api::endpoints;
use crate::models::{
    Analytics, CourseList, DashboardStats, FinancialOverview, NotificationFeed, SidebarSummary,
    SystemSettings, UserPage, WithdrawalPage,
};

use super::placeholder;

/// A category of dashboard data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Dashboard,
    Users,
    Notifications,
    Courses,
    Financial,
    Analytics,
    Settings,
    Sidebar,
}

impl Domain {
    pub const ALL: [Self; 8] = [
        Self::Dashboard,
        Self::Users,
        Self::Notifications,
        Self::Courses,
        Self::Financial,
        Self::Analytics,
        Self::Settings,
        Self::Sidebar,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Users => "users",
            Self::Notifications => "notifications",
            Self::Courses => "courses",
            Self::Financial => "financial",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
            Self::Sidebar => "sidebar",
        }
    }

    /// Read endpoint for this domain.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => endpoints::DASHBOARD_STATS,
            Self::Users => endpoints::USERS,
            Self::Notifications => endpoints::NOTIFICATIONS,
            Self::Courses => endpoints::COURSES,
            Self::Financial => endpoints::FINANCIAL_OVERVIEW,
            Self::Analytics => endpoints::ANALYTICS,
            Self::Settings => endpoints::SETTINGS,
            Self::Sidebar => endpoints::SIDEBAR,
        }
    }

    /// Human label used in "Failed to load ..." messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard statistics",
            Self::Users => "users",
            Self::Notifications => "notifications",
            Self::Courses => "courses",
            Self::Financial => "financial data",
            Self::Analytics => "analytics",
            Self::Settings => "settings",
            Self::Sidebar => "sidebar summary",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown domain: {s}"))
    }
}

/// A payload type served by a [`DataResource`](super::DataResource).
///
/// Each implementation names its domain, its read endpoint and the
/// placeholder value served before the first fetch and in mock mode.
pub trait DomainData: Clone + Send + Sync + DeserializeOwned + 'static {
    const DOMAIN: Domain;

    /// Read endpoint; the domain's own path unless overridden.
    const PATH: &'static str = Self::DOMAIN.path();

    /// Placeholder value for this domain.
    fn placeholder() -> Self;
}

impl DomainData for DashboardStats {
    const DOMAIN: Domain = Domain::Dashboard;

    fn placeholder() -> Self {
        placeholder::dashboard()
    }
}

impl DomainData for UserPage {
    const DOMAIN: Domain = Domain::Users;

    fn placeholder() -> Self {
        placeholder::users()
    }
}

impl DomainData for NotificationFeed {
    const DOMAIN: Domain = Domain::Notifications;

    fn placeholder() -> Self {
        placeholder::notifications()
    }
}

impl DomainData for CourseList {
    const DOMAIN: Domain = Domain::Courses;

    fn placeholder() -> Self {
        placeholder::courses()
    }
}

impl DomainData for FinancialOverview {
    const DOMAIN: Domain = Domain::Financial;

    fn placeholder() -> Self {
        placeholder::financial()
    }
}

/// The withdrawal queue belongs to the financial domain but has its own
/// endpoint.
impl DomainData for WithdrawalPage {
    const DOMAIN: Domain = Domain::Financial;
    const PATH: &'static str = endpoints::WITHDRAWALS;

    fn placeholder() -> Self {
        placeholder::withdrawals()
    }
}

impl DomainData for Analytics {
    const DOMAIN: Domain = Domain::Analytics;

    fn placeholder() -> Self {
        placeholder::analytics()
    }
}

impl DomainData for SystemSettings {
    const DOMAIN: Domain = Domain::Settings;

    fn placeholder() -> Self {
        placeholder::settings()
    }
}

impl DomainData for SidebarSummary {
    const DOMAIN: Domain = Domain::Sidebar;

    fn placeholder() -> Self {
        placeholder::sidebar()
    }
}
