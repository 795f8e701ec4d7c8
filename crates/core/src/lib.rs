//! YBS Core - Shared types library.
//!
//! This crate provides common types used across the YBS admin console:
//! - `admin` - Session manager, transport and data synchronization layer
//! - `cli` - Command-line front end for staff
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for backend IDs, amounts, emails, roles and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
