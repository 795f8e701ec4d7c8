//! Platform-wide settings editable by super admins.

use serde::{Deserialize, Serialize};

use ybs_core::Amount;

/// Current system settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    pub platform_name: String,
    pub support_email: String,
    /// Bonus credited to the referrer for each qualifying sign-up.
    pub referral_bonus: Amount,
    pub min_withdrawal: Amount,
    pub max_withdrawal: Amount,
    /// Percentage fee deducted from withdrawals.
    pub withdrawal_fee_percent: Amount,
    #[serde(default)]
    pub maintenance_mode: bool,
    #[serde(default = "default_true")]
    pub registration_open: bool,
}

const fn default_true() -> bool {
    true
}

/// Partial settings update; unset fields keep their current value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referral_bonus: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_withdrawal: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_withdrawal: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub withdrawal_fee_percent: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance_mode: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_open: Option<bool>,
}

impl SettingsUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.platform_name.is_none()
            && self.support_email.is_none()
            && self.referral_bonus.is_none()
            && self.min_withdrawal.is_none()
            && self.max_withdrawal.is_none()
            && self.withdrawal_fee_percent.is_none()
            && self.maintenance_mode.is_none()
            && self.registration_open.is_none()
    }

    /// Settings as they would look after applying this update.
    #[must_use]
    pub fn apply_to(&self, current: &SystemSettings) -> SystemSettings {
        SystemSettings {
            platform_name: self
                .platform_name
                .clone()
                .unwrap_or_else(|| current.platform_name.clone()),
            support_email: self
                .support_email
                .clone()
                .unwrap_or_else(|| current.support_email.clone()),
            referral_bonus: self.referral_bonus.unwrap_or(current.referral_bonus),
            min_withdrawal: self.min_withdrawal.unwrap_or(current.min_withdrawal),
            max_withdrawal: self.max_withdrawal.unwrap_or(current.max_withdrawal),
            withdrawal_fee_percent: self
                .withdrawal_fee_percent
                .unwrap_or(current.withdrawal_fee_percent),
            maintenance_mode: self.maintenance_mode.unwrap_or(current.maintenance_mode),
            registration_open: self.registration_open.unwrap_or(current.registration_open),
        }
    }
}
