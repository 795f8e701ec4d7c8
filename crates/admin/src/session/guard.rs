//! Route guards for protected views.
//!
//! Guards are pure functions of a [`Session`] snapshot, so a view can decide
//! what to render without touching the network.

use super::{AuthState, Session};
use crate::models::AdminIdentity;

/// Route the guard redirects signed-out admins to.
pub const LOGIN_ROUTE: &str = "/login";

/// What a protected view should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still resolving; show a spinner and nothing protected.
    Pending,
    /// Not signed in.
    RedirectToLogin(&'static str),
    /// Signed in; render the view for this admin.
    Allow(AdminIdentity),
    /// Signed in, but the role is not allowed here.
    Forbidden,
}

impl GuardDecision {
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow(_))
    }
}

/// Guard for views any admin may see.
#[must_use]
pub fn guard(session: &Session) -> GuardDecision {
    match (&session.state, &session.identity) {
        (AuthState::Unknown | AuthState::Authenticating, _) => GuardDecision::Pending,
        (AuthState::Authenticated, Some(identity)) => GuardDecision::Allow(identity.clone()),
        _ => GuardDecision::RedirectToLogin(LOGIN_ROUTE),
    }
}

/// Guard for settings and admin management.
#[must_use]
pub fn require_super_admin(session: &Session) -> GuardDecision {
    match guard(session) {
        GuardDecision::Allow(identity) if !identity.is_super_admin() => GuardDecision::Forbidden,
        decision => decision,
    }
}
