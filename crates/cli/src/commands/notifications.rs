//! `ybs notifications ...`.

use ybs_admin::AdminConsole;
use ybs_core::NotificationId;

use super::{CliError, require_admin};
use crate::output;

pub async fn list(console: &AdminConsole) -> Result<(), CliError> {
    require_admin(console).await?;
    output::snapshot(&console.notifications().refresh().await)
}

/// Wait for the background call so the process does not exit before it is
/// sent; a failure is reported but the local change is not undone.
async fn settle(handle: ybs_admin::sync::Reconcile) -> Result<(), CliError> {
    match handle.await {
        Ok(result) => {
            result?;
            Ok(())
        }
        Err(e) => Err(CliError::InvalidArgument(format!("background task failed: {e}"))),
    }
}

pub async fn read(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    let center = console.notifications();
    center.refresh().await;
    settle(center.mark_read(&NotificationId::new(id))).await?;
    output::line("Marked as read");
    Ok(())
}

pub async fn read_all(console: &AdminConsole) -> Result<(), CliError> {
    require_admin(console).await?;
    let center = console.notifications();
    center.refresh().await;
    settle(center.mark_all_read()).await?;
    output::line("All notifications marked as read");
    Ok(())
}

pub async fn delete(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    let center = console.notifications();
    center.refresh().await;
    settle(center.delete(&NotificationId::new(id))).await?;
    output::line("Notification deleted");
    Ok(())
}

/// Poll until Ctrl-C, printing the unread count whenever it changes.
pub async fn watch(console: &AdminConsole) -> Result<(), CliError> {
    require_admin(console).await?;
    let center = console.notifications();
    let period = console.config().notification_poll_interval;

    let mut last = center.refresh().await.data.unread_count;
    output::line(&format!("{last} unread"));
    center.start_polling();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            () = tokio::time::sleep(period) => {
                let unread = center.snapshot().data.unread_count;
                if unread != last {
                    output::line(&format!("{unread} unread"));
                    last = unread;
                }
            }
        }
    }

    center.stop_polling();
    Ok(())
}
