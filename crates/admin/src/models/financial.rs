//! Financial overview and the withdrawal queue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ybs_core::{Amount, UserId, WithdrawalId, WithdrawalStatus};

use super::Pagination;

/// Platform-wide money figures.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialOverview {
    pub total_revenue: Amount,
    /// Referral earnings credited to users.
    pub total_payouts: Amount,
    pub pending_withdrawals: Amount,
    pub completed_withdrawals: Amount,
    pub monthly: Vec<MonthlyFigure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyFigure {
    /// Month label, e.g. `2024-05`.
    pub month: String,
    #[serde(default)]
    pub revenue: Amount,
    #[serde(default)]
    pub payouts: Amount,
}

impl FinancialOverview {
    /// Revenue minus payouts.
    #[must_use]
    pub fn net(&self) -> Amount {
        Amount::new(self.total_revenue.value() - self.total_payouts.value())
    }
}

/// A user's request to cash out their balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: WithdrawalId,
    pub user_id: UserId,
    pub user_name: String,
    pub user_email: String,
    pub amount: Amount,
    /// Payout channel, e.g. `bank_transfer`.
    #[serde(default)]
    pub method: String,
    pub status: WithdrawalStatus,
    pub requested_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPage {
    pub withdrawals: Vec<Withdrawal>,
    pub pagination: Pagination,
}

impl WithdrawalPage {
    /// Total amount of the pending requests on this page.
    #[must_use]
    pub fn pending_total(&self) -> Amount {
        self.withdrawals
            .iter()
            .filter(|w| w.status == WithdrawalStatus::Pending)
            .map(|w| w.amount)
            .sum()
    }
}

/// Filters for the withdrawal queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalQuery {
    pub page: u32,
    pub limit: u32,
    pub status: Option<WithdrawalStatus>,
}

impl Default for WithdrawalQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
        }
    }
}

impl WithdrawalQuery {
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.to_string()));
        }
        pairs
    }
}
