//! `ybs courses ...`.

use ybs_admin::AdminConsole;
use ybs_core::CourseId;

use super::{CliError, require_admin};
use crate::output;

pub async fn list(console: &AdminConsole) -> Result<(), CliError> {
    require_admin(console).await?;
    output::snapshot(&console.courses().refresh().await)
}

pub async fn approve(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    console.courses().approve(&CourseId::new(id)).await?;
    output::line("Course approved");
    Ok(())
}

pub async fn reject(console: &AdminConsole, id: &str, reason: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    console.courses().reject(&CourseId::new(id), reason).await?;
    output::line("Course rejected");
    Ok(())
}

pub async fn revise(console: &AdminConsole, id: &str, notes: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    let courses = console.courses();
    courses.request_revision(&CourseId::new(id), notes).await?;
    output::snapshot(&courses.snapshot())
}
