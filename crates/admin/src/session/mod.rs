//! Admin authentication state.
//!
//! # Architecture
//!
//! - [`SessionManager`] owns identity, token and [`AuthState`]; everything
//!   else reads [`Session`] snapshots
//! - The manager implements [`CredentialSource`](crate::api::CredentialSource),
//!   so the transport attaches its token and reports 401s back to it
//! - [`TokenStore`] persists the token between runs under `adminToken`
//! - [`guard`] and [`require_super_admin`] decide what a protected view renders

mod guard;
mod manager;
mod store;

pub use guard::{GuardDecision, LOGIN_ROUTE, guard, require_super_admin};
pub use manager::{AuthError, AuthState, Session, SessionManager};
pub use store::{FileTokenStore, MemoryTokenStore, TOKEN_KEY, TokenStore, TokenStoreError};
