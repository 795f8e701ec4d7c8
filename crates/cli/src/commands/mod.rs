//! Subcommand implementations.

pub mod auth;
pub mod courses;
pub mod export;
pub mod notifications;
pub mod settings;
pub mod show;
pub mod users;
pub mod withdrawals;

use thiserror::Error;
use tracing::warn;

use ybs_admin::AdminConsole;
use ybs_admin::AppError;
use ybs_admin::models::AdminIdentity;
use ybs_admin::session::{GuardDecision, guard, require_super_admin};

/// Errors that end a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    /// No valid session for a command that needs one.
    #[error("Not signed in. Run `ybs login` first.")]
    NotSignedIn,

    /// Signed in, but the role may not run this command.
    #[error("Only super admins can do this")]
    Forbidden,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Output could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            Self::App(e) => e.user_message(),
            _ => self.to_string(),
        }
    }

    pub fn report(&self) {
        if let Self::App(e) = self {
            e.report();
        }
    }
}

impl From<ybs_admin::api::ApiError> for CliError {
    fn from(err: ybs_admin::api::ApiError) -> Self {
        Self::App(err.into())
    }
}

/// Resolve the session and require any signed-in admin.
///
/// Without a backend URL there is nothing to authenticate against and
/// placeholder data is shown without a session. Forced mock mode with a
/// backend still checks, since mutations reach that backend.
pub async fn require_admin(console: &AdminConsole) -> Result<Option<AdminIdentity>, CliError> {
    check(console, guard).await
}

/// Like [`require_admin`], but only for super admins.
pub async fn require_super(console: &AdminConsole) -> Result<Option<AdminIdentity>, CliError> {
    check(console, require_super_admin).await
}

async fn check(
    console: &AdminConsole,
    decide: fn(&ybs_admin::session::Session) -> GuardDecision,
) -> Result<Option<AdminIdentity>, CliError> {
    if console.config().api_base_url.is_none() {
        warn!("No backend configured, showing placeholder data");
        return Ok(None);
    }
    console.session().verify().await;
    match decide(&console.session().snapshot()) {
        GuardDecision::Allow(admin) => Ok(Some(admin)),
        GuardDecision::Forbidden => Err(CliError::Forbidden),
        GuardDecision::RedirectToLogin(_) | GuardDecision::Pending => Err(CliError::NotSignedIn),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use serde_json::json;
    use url::Url;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use ybs_admin::AdminConfig;
    use ybs_admin::api::ApiClient;
    use ybs_admin::session::MemoryTokenStore;

    fn forced_mock_console(server: &MockServer) -> AdminConsole {
        let mut config = AdminConfig::live(Url::parse(&server.uri()).unwrap());
        config.force_mock_data = true;
        let client = ApiClient::from_config(&config).unwrap();
        AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::with_token("tok")))
    }

    fn admin(role: &str) -> serde_json::Value {
        json!({"success": true, "data": {"admin": {
            "id": "adm_1",
            "email": "admin@ybs.com",
            "firstName": "Ada",
            "lastName": "Obi",
            "role": role,
            "createdAt": "2024-01-01T00:00:00Z",
            "lastLogin": null
        }}})
    }

    #[tokio::test]
    async fn test_no_backend_skips_guard() {
        let config = AdminConfig::default();
        let client = ApiClient::from_config(&config).unwrap();
        let console =
            AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::new()));
        assert!(require_super(&console).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_forced_mock_with_backend_still_checks_role() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/auth/verify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(admin("ADMIN")))
            .expect(1)
            .mount(&server)
            .await;

        let console = forced_mock_console(&server);
        assert!(!console.mode().is_live());
        assert!(matches!(require_super(&console).await, Err(CliError::Forbidden)));
    }

    #[tokio::test]
    async fn test_forced_mock_with_backend_requires_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/auth/verify"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"success": false, "message": "Token expired"})),
            )
            .mount(&server)
            .await;

        let console = forced_mock_console(&server);
        assert!(matches!(require_admin(&console).await, Err(CliError::NotSignedIn)));
    }
}
