//! Data synchronization layer.
//!
//! # Architecture
//!
//! - [`DataResource`] is the one generic `{data, loading, error, refresh}`
//!   primitive; each payload type names its [`Domain`], endpoint and
//!   placeholder through [`DomainData`]
//! - Reads never fail outward: errors land in the snapshot and the previous
//!   data stays (sticky fallback)
//! - In [`DataMode::Mock`](crate::config::DataMode) reads serve placeholders
//!   and never touch the network; mutations are still sent
//! - Specialized consumers wrap a resource: [`UserDirectory`],
//!   [`NotificationCenter`], [`CourseModeration`], [`WithdrawalQueue`],
//!   [`SettingsEditor`]

mod courses;
mod domain;
mod financial;
mod notifications;
pub mod optimistic;
mod placeholder;
mod resource;
mod settings;
mod users;

pub use courses::{CourseModeration, RevisionRequest};
pub use domain::{Domain, DomainData};
pub use financial::{WithdrawalQueue, export_financial_report};
pub use notifications::{NotificationCenter, NotificationPoller};
pub use optimistic::{Reconcile, apply_then_reconcile};
pub use resource::{DataResource, ResourceSnapshot, ViewState};
pub use settings::SettingsEditor;
pub use users::UserDirectory;
