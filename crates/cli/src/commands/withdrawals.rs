//! `ybs withdrawals ...`.

use ybs_admin::AdminConsole;
use ybs_admin::models::WithdrawalQuery;
use ybs_core::{WithdrawalId, WithdrawalStatus};

use super::{CliError, require_admin};
use crate::output;

pub async fn list(
    console: &AdminConsole,
    page: u32,
    status: Option<WithdrawalStatus>,
) -> Result<(), CliError> {
    require_admin(console).await?;
    let queue = console.withdrawals();
    let snapshot = queue
        .apply_query(WithdrawalQuery {
            page,
            status,
            ..queue.query()
        })
        .await?;
    output::snapshot(&snapshot)
}

pub async fn approve(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    console.withdrawals().approve(&WithdrawalId::new(id)).await?;
    output::line("Withdrawal approved");
    Ok(())
}

pub async fn reject(console: &AdminConsole, id: &str, reason: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    console
        .withdrawals()
        .reject(&WithdrawalId::new(id), reason)
        .await?;
    output::line("Withdrawal rejected");
    Ok(())
}
