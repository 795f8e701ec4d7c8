//! `ybs show <domain>`.

use ybs_admin::AdminConsole;
use ybs_admin::models::AnalyticsPeriod;
use ybs_admin::sync::Domain;

use super::{CliError, require_admin, require_super};
use crate::output;

pub async fn show(console: &AdminConsole, domain: &str, period: Option<&str>) -> Result<(), CliError> {
    let domain: Domain = domain.parse().map_err(CliError::InvalidArgument)?;
    if domain == Domain::Settings {
        require_super(console).await?;
    } else {
        require_admin(console).await?;
    }

    match domain {
        Domain::Dashboard => output::snapshot(&console.dashboard().refresh().await),
        Domain::Users => output::snapshot(&console.users().refresh().await),
        Domain::Notifications => output::snapshot(&console.notifications().refresh().await),
        Domain::Courses => output::snapshot(&console.courses().refresh().await),
        Domain::Financial => output::snapshot(&console.financial().refresh().await),
        Domain::Analytics => {
            let period = period
                .map(str::parse::<AnalyticsPeriod>)
                .transpose()
                .map_err(CliError::InvalidArgument)?
                .unwrap_or_default();
            console.set_analytics_period(period).await;
            output::snapshot(&console.analytics().snapshot())
        }
        Domain::Settings => output::snapshot(&console.settings().refresh().await),
        Domain::Sidebar => output::snapshot(&console.sidebar().refresh().await),
    }
}
