//! Integration tests for the YBS admin console.
//!
//! Each test starts a `wiremock` server standing in for the platform backend
//! and drives the console library against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p ybs-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session` - Login, verify, logout and route guards
//! - `data_sync` - Fetch, fallback and mock-mode behaviour
//! - `notifications` - Optimistic edits and polling
//! - `console` - Mutations and console-wide refresh

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ybs_admin::api::ApiClient;
use ybs_admin::session::{MemoryTokenStore, SessionManager, TokenStore};
use ybs_admin::{AdminConfig, AdminConsole};

/// Token issued by [`mount_login`] and accepted by [`mount_verify`].
pub const TEST_TOKEN: &str = "test-access-token";

/// Admin profile as the backend serializes it.
#[must_use]
pub fn admin_json(role: &str) -> Value {
    json!({
        "id": "adm_1",
        "email": "admin@ybs.com",
        "firstName": "Ada",
        "lastName": "Obi",
        "role": role,
        "permissions": [],
        "isActive": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "lastLogin": null
    })
}

/// `{success: true, data}` envelope.
#[must_use]
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

/// `{success: false, message}` envelope with the given status.
#[must_use]
pub fn fail(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({"success": false, "message": message}))
}

/// Answer verify with the given role.
pub async fn mount_verify(server: &MockServer, role: &str) {
    Mock::given(method("GET"))
        .and(path("/admin/auth/verify"))
        .respond_with(ok(json!({"admin": admin_json(role)})))
        .mount(server)
        .await;
}

/// Accept any login and issue [`TEST_TOKEN`].
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/admin/auth/login"))
        .respond_with(ok(json!({
            "admin": admin_json("ADMIN"),
            "accessToken": TEST_TOKEN
        })))
        .mount(server)
        .await;
}

#[must_use]
pub fn base_url(server: &MockServer) -> Url {
    Url::parse(&server.uri()).unwrap()
}

/// Session manager against `server`, optionally holding a stored token.
#[must_use]
pub fn session(server: &MockServer, store: Arc<dyn TokenStore>) -> SessionManager {
    let client = ApiClient::new(Some(base_url(server)), Some(Duration::from_secs(5))).unwrap();
    SessionManager::new(client, store)
}

/// Live console against `server` with a stored token.
#[must_use]
pub fn live_console(server: &MockServer) -> AdminConsole {
    let mut config = AdminConfig::live(base_url(server));
    config.notification_poll_interval = Duration::from_millis(50);
    let client = ApiClient::from_config(&config).unwrap();
    AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::with_token(TEST_TOKEN)))
}

/// Console with no backend configured.
#[must_use]
pub fn mock_console() -> AdminConsole {
    let config = AdminConfig::default();
    let client = ApiClient::from_config(&config).unwrap();
    AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::new()))
}
