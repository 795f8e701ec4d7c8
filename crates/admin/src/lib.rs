//! YBS admin console library.
//!
//! The client side of the referral platform's admin dashboard: who is signed
//! in, and what data each dashboard view shows.
//!
//! # Layers
//!
//! - [`api`]: HTTP transport and the response envelope
//! - [`session`]: authentication state, token persistence, route guards
//! - [`sync`]: per-domain data resources with placeholder fallback
//! - [`state`]: [`AdminConsole`](state::AdminConsole), which wires them together

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod state;
pub mod sync;
pub mod validation;

pub use config::{AdminConfig, DataMode};
pub use error::AppError;
pub use state::AdminConsole;
