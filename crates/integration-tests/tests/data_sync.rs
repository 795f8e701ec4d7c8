//! Fetch, fallback and mock-mode behaviour of the data resources.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ybs_admin::api::{ApiClient, ApiError};
use ybs_admin::models::{AnalyticsPeriod, DashboardStats, UserPage, UserQuery};
use ybs_admin::session::MemoryTokenStore;
use ybs_admin::sync::{DomainData, ViewState};
use ybs_admin::{AdminConfig, AdminConsole};
use ybs_core::UserStatus;
use ybs_integration_tests::{TEST_TOKEN, base_url, fail, live_console, mock_console, ok};

fn user_page(ids: &[&str]) -> Value {
    let users: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "email": format!("{id}@example.com"),
                "firstName": "Test",
                "lastName": "User",
                "status": "active",
                "totalReferrals": 1,
                "totalEarnings": "100.00",
                "balance": "50.00",
                "createdAt": "2024-03-01T00:00:00Z"
            })
        })
        .collect();
    json!({
        "users": users,
        "pagination": {"page": 1, "limit": 10, "total": ids.len(), "totalPages": 1}
    })
}

// =============================================================================
// Fallback
// =============================================================================

#[tokio::test]
async fn test_users_500_keeps_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(fail(500, "Internal error"))
        .mount(&server)
        .await;

    let console = live_console(&server);
    let snapshot = console.users().refresh().await;

    assert_eq!(snapshot.data, UserPage::placeholder());
    assert!(!snapshot.loading);
    assert!(matches!(snapshot.error, Some(ApiError::Server { status: 500, .. })));
    assert!(matches!(snapshot.view(), ViewState::Failed { stale: false, .. }));
}

#[tokio::test]
async fn test_failure_after_success_keeps_last_good_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ok(user_page(&["usr_a", "usr_b"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let console = live_console(&server);
    let first = console.users().refresh().await;
    assert_eq!(first.data.users.len(), 2);
    assert!(first.error.is_none());

    let second = console.users().refresh().await;
    assert_eq!(second.data, first.data);
    assert!(second.error.is_some());
    assert_eq!(second.last_updated, first.last_updated);
    assert!(matches!(second.view(), ViewState::Failed { stale: true, .. }));
}

#[tokio::test]
async fn test_success_false_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard/stats"))
        .respond_with(fail(200, "Stats are being recalculated"))
        .mount(&server)
        .await;

    let console = live_console(&server);
    let snapshot = console.dashboard().refresh().await;

    assert_eq!(snapshot.data, DashboardStats::placeholder());
    assert_eq!(
        snapshot.error.unwrap().user_message(),
        "Stats are being recalculated"
    );
}

#[tokio::test]
async fn test_network_failure_shows_network_message() {
    // Nothing listens on port 9 on the loopback interface.
    let config = AdminConfig::live(url::Url::parse("http://127.0.0.1:9/").unwrap());
    let client = ApiClient::from_config(&config).unwrap();
    let console =
        AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::with_token(TEST_TOKEN)));

    let snapshot = console.sidebar().refresh().await;
    match snapshot.view() {
        ViewState::Failed { message, .. } => assert_eq!(message, "Network error occurred"),
        other => panic!("expected failure, got {other:?}"),
    }
}

// =============================================================================
// Queries
// =============================================================================

#[tokio::test]
async fn test_user_filters_are_sent_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/users"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "25"))
        .and(query_param("search", "amaka"))
        .and(query_param("status", "suspended"))
        .respond_with(ok(user_page(&["usr_c"])))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    let snapshot = console
        .users()
        .apply_query(UserQuery {
            page: 2,
            limit: 25,
            search: Some("amaka".to_string()),
            status: Some(UserStatus::Suspended),
        })
        .await
        .unwrap();
    assert_eq!(snapshot.data.users.len(), 1);
}

#[tokio::test]
async fn test_analytics_period_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/analytics"))
        .and(query_param("period", "90d"))
        .respond_with(fail(500, ""))
        .expect(1)
        .mount(&server)
        .await;

    let console = live_console(&server);
    console.set_analytics_period(AnalyticsPeriod::Quarter).await;
    assert!(console.analytics().error().is_some());
}

// =============================================================================
// Mock mode
// =============================================================================

#[tokio::test]
async fn test_forced_mock_mode_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = AdminConfig::live(base_url(&server));
    config.force_mock_data = true;
    let client = ApiClient::from_config(&config).unwrap();
    let console =
        AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::with_token(TEST_TOKEN)));

    console.refresh_all().await;
    assert_eq!(console.users().snapshot().data, UserPage::placeholder());
    assert!(console.dashboard().error().is_none());
}

#[tokio::test]
async fn test_mock_console_serves_every_placeholder() {
    let console = mock_console();
    console.refresh_all().await;

    assert_eq!(console.dashboard().data(), DashboardStats::placeholder());
    assert!(!console.users().snapshot().data.users.is_empty());
    assert!(console.notifications().snapshot().data.unread_count > 0);
    assert!(!console.courses().snapshot().data.courses.is_empty());
    assert!(!console.withdrawals().snapshot().data.withdrawals.is_empty());
    assert!(!console.settings().snapshot().data.platform_name.is_empty());
    assert!(matches!(console.sidebar().snapshot().view(), ViewState::Ready));
}
