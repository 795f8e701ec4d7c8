//! Mutations through the console and console-wide refresh.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer};

use ybs_admin::AppError;
use ybs_admin::models::{NewUser, SettingsUpdate};
use ybs_admin::validation::ValidationError;
use ybs_core::{CourseId, CourseStatus, Email, UserId, UserStatus, WithdrawalId};
use ybs_integration_tests::{fail, live_console, mock_console, ok};

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_user_then_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/users"))
        .and(body_json(json!({
            "email": "new.user@example.com",
            "firstName": "New",
            "lastName": "User"
        })))
        .respond_with(ok(json!({"id": "usr_9"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ok(json!({
            "users": [],
            "pagination": {"page": 1, "limit": 10, "total": 0, "totalPages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    console
        .users()
        .create(NewUser {
            email: Email::parse("new.user@example.com").unwrap(),
            first_name: "New".to_string(),
            last_name: "User".to_string(),
            phone: None,
            referred_by: None,
        })
        .await
        .unwrap();
    assert!(console.users().snapshot().last_updated.is_some());
}

#[tokio::test]
async fn test_create_user_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/users"))
        .respond_with(fail(409, "Email already registered"))
        .mount(&server)
        .await;

    let console = live_console(&server);
    let err = console
        .users()
        .create(NewUser {
            email: Email::parse("taken@example.com").unwrap(),
            first_name: "Taken".to_string(),
            last_name: "User".to_string(),
            phone: None,
            referred_by: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Email already registered");
}

#[tokio::test]
async fn test_suspend_user() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/users/usr_1/status"))
        .and(body_json(json!({"status": "suspended"})))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    console
        .users()
        .set_status(&UserId::new("usr_1"), UserStatus::Suspended)
        .await
        .unwrap();
}

// =============================================================================
// Courses and withdrawals
// =============================================================================

#[tokio::test]
async fn test_reject_course_requires_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/courses/crs_1/reject"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let console = live_console(&server);
    let err = console
        .courses()
        .reject(&CourseId::new("crs_1"), "   ")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::MissingField(_))
    ));
}

#[tokio::test]
async fn test_revision_request_overlays_course() {
    let console = mock_console();
    let courses = console.courses();
    courses.refresh().await;

    courses
        .request_revision(&CourseId::new("crs_201"), "Add captions to module 2")
        .await
        .unwrap();

    let snapshot = courses.snapshot();
    let course = snapshot.data.find(&CourseId::new("crs_201")).unwrap();
    assert_eq!(course.status, CourseStatus::RevisionRequested);
    assert_eq!(
        courses.revision(&CourseId::new("crs_201")).unwrap().notes,
        "Add captions to module 2"
    );
}

#[tokio::test]
async fn test_reject_withdrawal_sends_reason() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/admin/withdrawals/wdr_7/reject"))
        .and(body_json(json!({"reason": "Account details do not match"})))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    console
        .withdrawals()
        .reject(&WithdrawalId::new("wdr_7"), "Account details do not match")
        .await
        .unwrap();
}

// =============================================================================
// Settings and export
// =============================================================================

#[tokio::test]
async fn test_inconsistent_settings_are_not_sent() {
    let console = mock_console();
    console.settings().refresh().await;

    let current = console.settings().snapshot().data;
    let update = SettingsUpdate {
        min_withdrawal: Some(current.max_withdrawal),
        max_withdrawal: Some(current.min_withdrawal),
        ..SettingsUpdate::default()
    };
    let err = console.settings().update(&update).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::WithdrawalRange)
    ));
}

#[tokio::test]
async fn test_export_returns_csv_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/financial/export"))
        .respond_with(
            wiremock::ResponseTemplate::new(200)
                .set_body_raw("month,revenue\n2024-05,1000.00\n", "text/csv"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    let bytes = console.export_financial_report().await.unwrap();
    assert!(bytes.starts_with(b"month,revenue"));
}

#[tokio::test]
async fn test_export_without_backend_fails() {
    let console = mock_console();
    let err = console.export_financial_report().await.unwrap_err();
    assert!(matches!(err, AppError::Api(_)));
}
