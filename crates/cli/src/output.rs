//! Terminal output.
//!
//! Data goes to stdout as pretty JSON so it can be piped; logs go to stderr.

#![allow(clippy::print_stdout)]

use serde::Serialize;
use tracing::warn;

use ybs_admin::sync::{DomainData, ResourceSnapshot, ViewState};

use crate::commands::CliError;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn line(message: &str) {
    println!("{message}");
}

/// Print a resource's data, warning if it could not be refreshed.
pub fn snapshot<T: DomainData + Serialize>(snapshot: &ResourceSnapshot<T>) -> Result<(), CliError> {
    if let ViewState::Failed { message, stale } = snapshot.view() {
        if stale {
            warn!("{message} (showing earlier data)");
        } else {
            warn!("{message} (showing placeholder data)");
        }
    }
    json(&snapshot.data)
}
