//! Session lifecycle against a mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use secrecy::ExposeSecret;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ybs_admin::session::{
    AuthError, AuthState, FileTokenStore, GuardDecision, LOGIN_ROUTE, MemoryTokenStore,
    TokenStore, guard, require_super_admin,
};
use ybs_integration_tests::{TEST_TOKEN, fail, mount_login, mount_verify, ok, session};

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_wrong_password_shows_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/login"))
        .respond_with(fail(401, "Invalid credentials"))
        .mount(&server)
        .await;

    let session = session(&server, Arc::new(MemoryTokenStore::new()));
    let err = session.login("admin@ybs.com", "wrongpass").await.unwrap_err();

    assert_eq!(err, AuthError::Rejected("Invalid credentials".to_string()));
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(session.current_admin().is_none());
}

#[tokio::test]
async fn test_repeated_failed_logins_never_populate_identity() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .expect(3)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let session = session(&server, store.clone());
    for _ in 0..3 {
        let err = session.login("admin@ybs.com", "wrongpass").await.unwrap_err();
        assert_eq!(err, AuthError::Rejected("Login failed".to_string()));
        assert_eq!(session.state(), AuthState::Unauthenticated);
        assert!(session.current_admin().is_none());
    }
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_login_persists_token_to_file() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let token_path = dir.path().join("session.json");
    let session = session(&server, Arc::new(FileTokenStore::new(token_path.clone())));

    let admin = session.login("admin@ybs.com", "correct-horse").await.unwrap();
    assert_eq!(admin.email.as_str(), "admin@ybs.com");
    assert!(session.is_authenticated());

    // A fresh process picks the token up from disk.
    let reloaded = FileTokenStore::new(token_path).load().unwrap().unwrap();
    assert_eq!(reloaded.expose_secret(), TEST_TOKEN);
}

#[tokio::test]
async fn test_invalid_email_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/login"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let session = session(&server, Arc::new(MemoryTokenStore::new()));
    let err = session.login("not-an-email", "secret123").await.unwrap_err();
    assert!(matches!(err, AuthError::Validation(_)));
}

// =============================================================================
// Verify
// =============================================================================

#[tokio::test]
async fn test_verify_sends_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/auth/verify"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}")))
        .respond_with(ok(json!({"admin": ybs_integration_tests::admin_json("SUPER_ADMIN")})))
        .expect(1)
        .mount(&server)
        .await;

    let session = session(&server, Arc::new(MemoryTokenStore::with_token(TEST_TOKEN)));
    assert_eq!(session.state(), AuthState::Unknown);
    assert!(session.verify().await);

    let snapshot = session.snapshot();
    assert!(matches!(require_super_admin(&snapshot), GuardDecision::Allow(_)));
}

#[tokio::test]
async fn test_expired_token_is_dropped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/auth/verify"))
        .respond_with(fail(401, "Token expired"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token("stale"));
    let session = session(&server, store.clone());

    assert!(!session.verify().await);
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(store.load().unwrap().is_none());
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let server = MockServer::start().await;
    mount_verify(&server, "ADMIN").await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/logout"))
        .respond_with(fail(500, "Database unavailable"))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::with_token(TEST_TOKEN));
    let session = session(&server, store.clone());
    assert!(session.verify().await);

    assert!(session.logout().await.is_err());
    assert_eq!(session.state(), AuthState::Unauthenticated);
    assert!(session.current_admin().is_none());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_logout_when_signed_out_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/admin/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let session = session(&server, Arc::new(MemoryTokenStore::new()));
    session.logout().await.unwrap();
    assert_eq!(session.state(), AuthState::Unauthenticated);
}

// =============================================================================
// Guards
// =============================================================================

#[tokio::test]
async fn test_guard_redirects_when_signed_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/auth/verify"))
        .respond_with(fail(401, "Not signed in"))
        .expect(1)
        .mount(&server)
        .await;
    let session = session(&server, Arc::new(MemoryTokenStore::new()));

    assert_eq!(guard(&session.snapshot()), GuardDecision::Pending);
    session.verify().await;
    assert_eq!(
        guard(&session.snapshot()),
        GuardDecision::RedirectToLogin(LOGIN_ROUTE)
    );
}

#[tokio::test]
async fn test_unauthorized_data_call_signs_out() {
    let server = MockServer::start().await;
    mount_verify(&server, "ADMIN").await;
    Mock::given(method("GET"))
        .and(path("/admin/dashboard/stats"))
        .respond_with(fail(401, "Token revoked"))
        .mount(&server)
        .await;

    let console = ybs_integration_tests::live_console(&server);
    assert!(console.session().verify().await);

    let snapshot = console.dashboard().refresh().await;
    assert!(snapshot.error.unwrap().is_unauthorized());
    assert_eq!(
        guard(&console.session().snapshot()),
        GuardDecision::RedirectToLogin(LOGIN_ROUTE)
    );
}
