//! Unified error handling for the console.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::session::{AuthError, TokenStoreError};
use crate::validation::ValidationError;

/// Application-level error returned by mutations and console setup.
///
/// Reads never produce one of these: their failures land in the resource's
/// `error` field instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Login or logout failed.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Input was rejected before sending.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Token file could not be read or written.
    #[error("Token storage error: {0}")]
    TokenStore(#[from] TokenStoreError),

    /// Local file I/O (e.g. writing an export).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Message suitable for showing to an admin.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Auth(e) => e.to_string(),
            Self::Validation(e) => e.to_string(),
            Self::Config(e) => format!("Configuration error: {e}"),
            Self::TokenStore(_) => "Could not access the saved session".to_string(),
            Self::Io(e) => format!("File error: {e}"),
        }
    }

    /// Returns `true` if the admin has to sign in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Api(ApiError::Unauthorized(_)))
    }

    /// Report unexpected failures to Sentry and the log.
    ///
    /// Validation and backend rejections are expected outcomes and are not
    /// reported.
    pub fn report(&self) {
        if matches!(
            self,
            Self::Api(ApiError::Server { .. } | ApiError::Decode(_))
                | Self::TokenStore(_)
                | Self::Io(_)
        ) {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console operation failed"
            );
        }
    }
}

/// Set the Sentry user context from the signed-in admin.
pub fn set_sentry_user(admin_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
