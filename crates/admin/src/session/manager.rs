//! The session manager: single owner of "who is signed in".

use std::sync::Arc;

use parking_lot::RwLock;
use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::store::{TokenStore, TokenStoreError};
use crate::api::{ApiClient, ApiError, CredentialSource, endpoints};
use crate::error::{clear_sentry_user, set_sentry_user};
use crate::models::AdminIdentity;
use crate::validation::{ValidationError, validate_login};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    /// Process just started; nothing has been checked yet.
    #[default]
    Unknown,
    /// A login or verify call is in flight.
    Authenticating,
    Authenticated,
    Unauthenticated,
}

impl AuthState {
    /// Returns `true` while the outcome is not yet known.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Unknown | Self::Authenticating)
    }
}

/// Errors surfaced by login and logout.
///
/// `Display` is the message to show the admin.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The form input was rejected before any request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The backend refused the request; carries its message when it sent one.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error occurred")]
    Network,

    #[error("Backend is not configured")]
    NotConfigured,
}

impl AuthError {
    /// Map a transport error from the login endpoint.
    fn from_login(err: &ApiError) -> Self {
        Self::from_api(err, "Login failed")
    }

    fn from_api(err: &ApiError, fallback: &str) -> Self {
        match err {
            ApiError::Network(_) => Self::Network,
            ApiError::NotConfigured => Self::NotConfigured,
            ApiError::Unauthorized(Some(message))
            | ApiError::Rejected { message, .. }
            | ApiError::Server { message, .. }
                if !message.is_empty() =>
            {
                Self::Rejected(message.clone())
            }
            _ => Self::Rejected(fallback.to_string()),
        }
    }
}

/// Read-only snapshot of the session.
///
/// The token itself is never part of a snapshot; only the transport sees it
/// through [`CredentialSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub state: AuthState,
    pub identity: Option<AdminIdentity>,
}

impl Session {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self.state, AuthState::Authenticated) && self.identity.is_some()
    }
}

#[derive(Deserialize)]
struct VerifyData {
    admin: AdminIdentity,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginData {
    admin: AdminIdentity,
    access_token: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Default)]
struct SessionState {
    auth: AuthState,
    identity: Option<AdminIdentity>,
    token: Option<SecretString>,
    /// Bumped by every operation that starts or ends a session; a call whose
    /// epoch is stale by the time it settles must not write its result.
    epoch: u64,
}

impl SessionState {
    fn begin(&mut self) -> u64 {
        self.epoch += 1;
        if self.auth != AuthState::Authenticated {
            self.auth = AuthState::Authenticating;
        }
        self.epoch
    }

    /// `token` is `None` when the backend accepted a cookie credential.
    fn authenticate(&mut self, identity: AdminIdentity, token: Option<SecretString>) {
        self.auth = AuthState::Authenticated;
        self.identity = Some(identity);
        if token.is_some() {
            self.token = token;
        }
    }

    fn reset(&mut self, keep_token: bool) {
        self.auth = AuthState::Unauthenticated;
        self.identity = None;
        if !keep_token {
            self.token = None;
        }
    }
}

/// Owns the admin session and hands out authorized API clients.
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("SessionManager")
            .field("state", &state.auth)
            .field("admin", &state.identity.as_ref().map(|a| a.email.as_str()))
            .field("has_token", &state.token.is_some())
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Create a manager, picking up any token persisted by an earlier run.
    ///
    /// The session starts in [`AuthState::Unknown`]; call [`verify`](Self::verify)
    /// to resolve it.
    pub fn new(client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let token = match store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Could not read persisted token, starting signed out");
                None
            }
        };
        if token.is_some() {
            debug!("Loaded persisted admin token");
        }

        Self {
            inner: Arc::new(SessionInner {
                client,
                store,
                state: RwLock::new(SessionState {
                    token,
                    ..SessionState::default()
                }),
            }),
        }
    }

    /// API client that authenticates as the current session.
    #[must_use]
    pub fn client(&self) -> ApiClient {
        self.inner.client.with_credentials(Arc::new(self.clone()))
    }

    /// Snapshot of the current session.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        let state = self.inner.state.read();
        Session {
            state: state.auth,
            identity: state.identity.clone(),
        }
    }

    #[must_use]
    pub fn state(&self) -> AuthState {
        self.inner.state.read().auth
    }

    #[must_use]
    pub fn current_admin(&self) -> Option<AdminIdentity> {
        self.inner.state.read().identity.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.snapshot().is_authenticated()
    }

    /// Check the current credential against the backend.
    ///
    /// The request is sent even without a stored token, since the cookie
    /// jar may still hold a backend session. A network or server failure
    /// keeps the persisted token so a later verify can succeed; a rejection
    /// drops it.
    #[instrument(skip(self))]
    pub async fn verify(&self) -> bool {
        let epoch = self.inner.state.write().begin();

        let result = self
            .client()
            .get::<VerifyData>(endpoints::AUTH_VERIFY, &[])
            .await;

        let mut state = self.inner.state.write();
        if state.epoch != epoch {
            debug!("Session changed during verify, discarding result");
            return state.auth == AuthState::Authenticated;
        }

        match result {
            Ok(VerifyData { admin }) => {
                let token = state.token.clone();
                if token.is_none() {
                    debug!("No stored token, session carried by cookie");
                }
                info!(admin = %admin.email, "Session verified");
                set_sentry_user(admin.id.as_str(), Some(admin.email.as_str()));
                state.authenticate(admin, token);
                true
            }
            Err(e) => {
                let keep_token = matches!(
                    e,
                    ApiError::Network(_) | ApiError::Server { .. } | ApiError::NotConfigured
                );
                warn!(error = %e, keep_token, "Session verification failed");
                state.reset(keep_token);
                drop(state);
                if !keep_token {
                    self.forget_persisted_token();
                }
                false
            }
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the token is persisted and the identity returned. On
    /// failure the session is left unauthenticated with no identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` without sending a request when the
    /// input is malformed, otherwise the backend's message or a generic one.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminIdentity, AuthError> {
        let email = validate_login(email, password)?;
        let epoch = self.inner.state.write().begin();

        // Sent without credentials so a stale token cannot trip the 401 hook.
        let result = self
            .inner
            .client
            .post::<LoginData, _>(
                endpoints::AUTH_LOGIN,
                &LoginRequest {
                    email: email.as_str(),
                    password,
                },
            )
            .await;

        let outcome = match result {
            Ok(data) if data.access_token.trim().is_empty() => {
                warn!("Login response carried no access token");
                Err(AuthError::Rejected("Login failed".to_string()))
            }
            Ok(data) => Ok(data),
            Err(e) => {
                warn!(error = %e, "Login failed");
                Err(AuthError::from_login(&e))
            }
        };

        let mut state = self.inner.state.write();
        match outcome {
            Ok(LoginData {
                admin,
                access_token,
            }) => {
                let token = SecretString::from(access_token);
                state.epoch += 1;
                state.authenticate(admin.clone(), Some(token.clone()));
                drop(state);

                if let Err(e) = self.inner.store.save(&token) {
                    warn!(error = %e, "Could not persist admin token");
                }
                set_sentry_user(admin.id.as_str(), Some(admin.email.as_str()));
                info!(admin = %admin.email, role = %admin.role, "Admin signed in");
                Ok(admin)
            }
            Err(e) => {
                if state.epoch == epoch {
                    state.reset(false);
                    drop(state);
                    self.forget_persisted_token();
                }
                Err(e)
            }
        }
    }

    /// Sign out.
    ///
    /// The local session and persisted token are cleared whatever the
    /// backend answers. Signing out while already signed out succeeds without
    /// a request.
    ///
    /// # Errors
    ///
    /// Returns the backend or network failure for display; the session is
    /// cleared either way.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), AuthError> {
        {
            let mut state = self.inner.state.write();
            if state.auth != AuthState::Authenticated && state.token.is_none() {
                state.reset(false);
                debug!("Logout while signed out is a no-op");
                return Ok(());
            }
            state.epoch += 1;
        }

        let result = self
            .client()
            .command(Method::POST, endpoints::AUTH_LOGOUT)
            .await;

        self.clear();
        info!("Admin signed out");

        match result {
            Ok(_) => Ok(()),
            // The token was already dead; the outcome is the same.
            Err(e) if e.is_unauthorized() => Ok(()),
            Err(e) => {
                warn!(error = %e, "Logout request failed, session cleared locally");
                Err(AuthError::from_api(&e, "Logout failed"))
            }
        }
    }

    /// Drop the session and persisted token.
    fn clear(&self) {
        {
            let mut state = self.inner.state.write();
            state.epoch += 1;
            state.reset(false);
        }
        self.forget_persisted_token();
        clear_sentry_user();
    }

    fn forget_persisted_token(&self) {
        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "Could not remove persisted admin token");
        }
    }

    /// Persist a token obtained out of band (e.g. `ybs login --token`).
    ///
    /// The session stays unresolved until the next [`verify`](Self::verify).
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the token cannot be written.
    pub fn adopt_token(&self, token: SecretString) -> Result<(), TokenStoreError> {
        if token.expose_secret().trim().is_empty() {
            return Ok(());
        }
        self.inner.store.save(&token)?;
        let mut state = self.inner.state.write();
        state.epoch += 1;
        state.auth = AuthState::Unknown;
        state.identity = None;
        state.token = Some(token);
        Ok(())
    }
}

impl CredentialSource for SessionManager {
    fn bearer_token(&self) -> Option<SecretString> {
        self.inner.state.read().token.clone()
    }

    fn on_unauthorized(&self) {
        warn!("Backend rejected the session token");
        self.clear();
    }
}
