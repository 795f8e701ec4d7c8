//! Apply-then-reconcile updates.
//!
//! The local edit is applied immediately and the backend call runs in the
//! background. A failed call is logged and returned through the handle but
//! the local edit stays: the next refresh brings the authoritative state.

use std::future::Future;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::domain::DomainData;
use super::resource::DataResource;
use crate::api::{Ack, ApiError};

/// Handle to the background half of an optimistic update.
pub type Reconcile = JoinHandle<Result<Ack, ApiError>>;

/// Apply `edit` to `resource` now and send `remote` in the background.
///
/// Must be called from within a Tokio runtime.
pub fn apply_then_reconcile<T, F>(
    resource: &DataResource<T>,
    edit: impl FnOnce(&mut T),
    remote: F,
) -> Reconcile
where
    T: DomainData,
    F: Future<Output = Result<Ack, ApiError>> + Send + 'static,
{
    resource.update_local(edit);
    let domain = T::DOMAIN;
    tokio::spawn(async move {
        let result = remote.await;
        match &result {
            Ok(_) => debug!(%domain, "Background update confirmed"),
            Err(e) => warn!(%domain, error = %e, "Background update failed, keeping local change"),
        }
        result
    })
}
