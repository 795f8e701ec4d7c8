//! Backend endpoint paths, relative to the configured base URL.

use ybs_core::{CourseId, NotificationId, UserId, WithdrawalId};

use super::ApiError;

pub const AUTH_VERIFY: &str = "admin/auth/verify";
pub const AUTH_LOGIN: &str = "admin/auth/login";
pub const AUTH_LOGOUT: &str = "admin/auth/logout";

pub const DASHBOARD_STATS: &str = "admin/dashboard/stats";
pub const USERS: &str = "admin/users";
pub const NOTIFICATIONS: &str = "admin/notifications";
pub const NOTIFICATIONS_READ_ALL: &str = "admin/notifications/read-all";
pub const COURSES: &str = "admin/courses";
pub const FINANCIAL_OVERVIEW: &str = "admin/financial/overview";
pub const FINANCIAL_EXPORT: &str = "admin/financial/export";
pub const WITHDRAWALS: &str = "admin/withdrawals";
pub const ANALYTICS: &str = "admin/analytics";
pub const SETTINGS: &str = "admin/settings";
pub const SIDEBAR: &str = "admin/sidebar";

/// Percent-encode an identifier for use as a single path segment.
///
/// `.` and `..` survive encoding as dot segments, so they are refused along
/// with empty IDs.
fn segment(id: &str) -> Result<String, ApiError> {
    match id.trim() {
        "" | "." | ".." => Err(ApiError::InvalidRequest(format!("invalid identifier: {id:?}"))),
        _ => Ok(urlencoding::encode(id).into_owned()),
    }
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn user(id: &UserId) -> Result<String, ApiError> {
    Ok(format!("{USERS}/{}", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn user_status(id: &UserId) -> Result<String, ApiError> {
    Ok(format!("{USERS}/{}/status", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn notification(id: &NotificationId) -> Result<String, ApiError> {
    Ok(format!("{NOTIFICATIONS}/{}", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn notification_read(id: &NotificationId) -> Result<String, ApiError> {
    Ok(format!("{NOTIFICATIONS}/{}/read", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn course_approve(id: &CourseId) -> Result<String, ApiError> {
    Ok(format!("{COURSES}/{}/approve", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn course_reject(id: &CourseId) -> Result<String, ApiError> {
    Ok(format!("{COURSES}/{}/reject", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn withdrawal_approve(id: &WithdrawalId) -> Result<String, ApiError> {
    Ok(format!("{WITHDRAWALS}/{}/approve", segment(id.as_str())?))
}

/// # Errors
///
/// Returns `ApiError::InvalidRequest` for an empty or dot-segment ID.
pub fn withdrawal_reject(id: &WithdrawalId) -> Result<String, ApiError> {
    Ok(format!("{WITHDRAWALS}/{}/reject", segment(id.as_str())?))
}
