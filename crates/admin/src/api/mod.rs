//! HTTP transport to the platform backend.
//!
//! # Architecture
//!
//! - [`ApiClient`] wraps a shared `reqwest::Client` with a cookie store
//! - Responses are decoded from the `{success, message, error, data}` envelope
//!   into `Result<T, ApiError>` at this boundary
//! - Bearer tokens come from a [`CredentialSource`]; a 401 from any endpoint is
//!   reported back to it, which is how session loss is centralized
//!
//! This is the leaf of the dependency graph: it knows nothing about sessions
//! or data resources.

mod client;
pub mod endpoints;
mod envelope;
mod error;

pub use client::{ApiClient, CredentialSource};
pub use envelope::{Ack, ApiEnvelope};
pub use error::ApiError;
