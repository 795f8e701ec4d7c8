//! Domain shapes returned by the platform backend.
//!
//! These types mirror the JSON the backend sends (camelCase fields) and are
//! what the data resources hold. None of them perform I/O.

mod admin;
mod analytics;
mod courses;
mod dashboard;
mod financial;
mod notifications;
mod settings;
mod sidebar;
mod users;

pub use admin::AdminIdentity;
pub use analytics::{Analytics, AnalyticsPeriod, DataPoint, TopReferrer};
pub use courses::{Course, CourseList};
pub use dashboard::{ActivityItem, DashboardStats};
pub use financial::{FinancialOverview, MonthlyFigure, Withdrawal, WithdrawalPage, WithdrawalQuery};
pub use notifications::{Notification, NotificationFeed};
pub use settings::{SettingsUpdate, SystemSettings};
pub use sidebar::SidebarSummary;
pub use users::{ManagedUser, NewUser, Pagination, UserPage, UserQuery, UserUpdate};
