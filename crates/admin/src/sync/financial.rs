//! Withdrawal queue and financial report export.

use parking_lot::RwLock;
use reqwest::Method;
use serde::Serialize;
use tracing::{info, instrument};

use ybs_core::WithdrawalId;

use super::resource::{DataResource, ResourceSnapshot};
use crate::api::endpoints;
use crate::config::DataMode;
use crate::error::AppError;
use crate::models::{WithdrawalPage, WithdrawalQuery};
use crate::session::SessionManager;
use crate::validation::{require_text, validate_pagination};

#[derive(Serialize)]
struct Rejection<'a> {
    reason: &'a str,
}

/// Paged withdrawal requests with approve and reject.
#[derive(Debug)]
pub struct WithdrawalQueue {
    resource: DataResource<WithdrawalPage>,
    session: SessionManager,
    query: RwLock<WithdrawalQuery>,
}

impl WithdrawalQueue {
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode, page_size: u32) -> Self {
        let query = WithdrawalQuery {
            limit: page_size,
            ..WithdrawalQuery::default()
        };
        let resource = DataResource::new(session.clone(), mode);
        resource.set_query(query.to_pairs());
        Self {
            resource,
            session,
            query: RwLock::new(query),
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &DataResource<WithdrawalPage> {
        &self.resource
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<WithdrawalPage> {
        self.resource.snapshot()
    }

    #[must_use]
    pub fn query(&self) -> WithdrawalQuery {
        self.query.read().clone()
    }

    pub async fn refresh(&self) -> ResourceSnapshot<WithdrawalPage> {
        self.resource.refresh().await
    }

    /// Replace the filters and fetch the matching page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an out-of-range page or page size.
    pub async fn apply_query(
        &self,
        query: WithdrawalQuery,
    ) -> Result<ResourceSnapshot<WithdrawalPage>, AppError> {
        validate_pagination(query.page, query.limit)?;
        self.resource.set_query(query.to_pairs());
        *self.query.write() = query;
        Ok(self.resource.refresh().await)
    }

    /// Approve a withdrawal, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the backend refuses.
    #[instrument(skip(self), fields(withdrawal_id = %id))]
    pub async fn approve(&self, id: &WithdrawalId) -> Result<(), AppError> {
        self.session
            .client()
            .command(Method::PATCH, &endpoints::withdrawal_approve(id)?)
            .await?;
        info!("Withdrawal approved");
        self.resource.refresh().await;
        Ok(())
    }

    /// Reject a withdrawal with a reason shown to the user, then refresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank reason, or `AppError::Api`
    /// if the backend refuses.
    #[instrument(skip(self, reason), fields(withdrawal_id = %id))]
    pub async fn reject(&self, id: &WithdrawalId, reason: &str) -> Result<(), AppError> {
        let reason = require_text("Rejection reason", reason)?;
        self.session
            .client()
            .command_with(
                Method::PATCH,
                &endpoints::withdrawal_reject(id)?,
                &Rejection { reason: &reason },
            )
            .await?;
        info!("Withdrawal rejected");
        self.resource.refresh().await;
        Ok(())
    }
}

/// Download the financial report as CSV bytes.
///
/// # Errors
///
/// Returns `AppError::Api` if the backend is not configured or the download
/// fails.
#[instrument(skip(session))]
pub async fn export_financial_report(session: &SessionManager) -> Result<Vec<u8>, AppError> {
    let bytes = session
        .client()
        .download(
            endpoints::FINANCIAL_EXPORT,
            &[("format".to_string(), "csv".to_string())],
        )
        .await?;
    info!(bytes = bytes.len(), "Financial report exported");
    Ok(bytes)
}
