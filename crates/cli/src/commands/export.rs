//! `ybs export`: download the financial report as CSV.

use std::path::Path;

use tracing::info;

use ybs_admin::AdminConsole;
use ybs_admin::AppError;

use super::{CliError, require_admin};
use crate::output;

pub async fn export(console: &AdminConsole, output_path: &Path) -> Result<(), CliError> {
    require_admin(console).await?;
    let report = console.export_financial_report().await?;
    tokio::fs::write(output_path, &report)
        .await
        .map_err(AppError::Io)?;
    info!(bytes = report.len(), path = %output_path.display(), "Financial report saved");
    output::line(&format!("Saved {}", output_path.display()));
    Ok(())
}
