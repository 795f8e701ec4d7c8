//! `ybs settings ...` (super admins only).

use clap::Args;
use rust_decimal::Decimal;

use ybs_admin::AdminConsole;
use ybs_admin::models::SettingsUpdate;
use ybs_core::Amount;

use super::{CliError, require_super};
use crate::output;

/// Fields to change; anything omitted keeps its current value.
#[derive(Debug, Default, Args)]
pub struct SettingsArgs {
    #[arg(long)]
    pub platform_name: Option<String>,

    #[arg(long)]
    pub support_email: Option<String>,

    /// Bonus paid to the referrer per sign-up.
    #[arg(long)]
    pub referral_bonus: Option<Decimal>,

    #[arg(long)]
    pub min_withdrawal: Option<Decimal>,

    #[arg(long)]
    pub max_withdrawal: Option<Decimal>,

    /// Fee taken from each withdrawal, in percent.
    #[arg(long)]
    pub withdrawal_fee_percent: Option<Decimal>,

    #[arg(long)]
    pub maintenance_mode: Option<bool>,

    #[arg(long)]
    pub registration_open: Option<bool>,
}

impl From<SettingsArgs> for SettingsUpdate {
    fn from(args: SettingsArgs) -> Self {
        Self {
            platform_name: args.platform_name,
            support_email: args.support_email,
            referral_bonus: args.referral_bonus.map(Amount::new),
            min_withdrawal: args.min_withdrawal.map(Amount::new),
            max_withdrawal: args.max_withdrawal.map(Amount::new),
            withdrawal_fee_percent: args.withdrawal_fee_percent.map(Amount::new),
            maintenance_mode: args.maintenance_mode,
            registration_open: args.registration_open,
        }
    }
}

pub async fn show(console: &AdminConsole) -> Result<(), CliError> {
    require_super(console).await?;
    output::snapshot(&console.settings().refresh().await)
}

pub async fn set(console: &AdminConsole, args: SettingsArgs) -> Result<(), CliError> {
    require_super(console).await?;
    let editor = console.settings();
    // Validation compares against what the backend currently holds.
    editor.refresh().await;
    editor.update(&args.into()).await?;
    output::snapshot(&editor.snapshot())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_update() {
        let args = SettingsArgs {
            min_withdrawal: Some(Decimal::new(2500, 2)),
            maintenance_mode: Some(true),
            ..SettingsArgs::default()
        };
        let update = SettingsUpdate::from(args);
        assert_eq!(update.min_withdrawal, Some(Amount::from_minor(2500)));
        assert_eq!(update.maintenance_mode, Some(true));
        assert!(update.platform_name.is_none());
    }

    #[test]
    fn test_empty_args_map_to_empty_update() {
        assert!(SettingsUpdate::from(SettingsArgs::default()).is_empty());
    }
}
