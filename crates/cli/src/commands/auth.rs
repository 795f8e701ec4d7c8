//! `ybs login`, `ybs logout`, `ybs whoami`.

use secrecy::SecretString;
use tracing::info;

use ybs_admin::AdminConsole;
use ybs_admin::AppError;

use super::CliError;
use crate::output;

pub async fn login(
    console: &AdminConsole,
    email: Option<String>,
    password: Option<String>,
    token: Option<String>,
) -> Result<(), CliError> {
    let session = console.session();

    if let Some(token) = token {
        session
            .adopt_token(SecretString::from(token))
            .map_err(AppError::from)?;
        if !session.verify().await {
            return Err(CliError::NotSignedIn);
        }
    } else {
        let email = email
            .ok_or_else(|| CliError::InvalidArgument("--email is required".to_string()))?;
        let password = password.ok_or_else(|| {
            CliError::InvalidArgument("--password or YBS_ADMIN_PASSWORD is required".to_string())
        })?;
        session
            .login(&email, &password)
            .await
            .map_err(AppError::from)?;
    }

    if let Some(admin) = session.current_admin() {
        info!(admin = %admin.email, "Signed in");
        output::line(&format!("Signed in as {} ({})", admin.display_name(), admin.role));
    }
    Ok(())
}

pub async fn logout(console: &AdminConsole) -> Result<(), CliError> {
    let result = console.session().logout().await;
    output::line("Signed out");
    result.map_err(|e| CliError::App(e.into()))
}

pub async fn whoami(console: &AdminConsole) -> Result<(), CliError> {
    if console.session().verify().await {
        if let Some(admin) = console.session().current_admin() {
            return output::json(&admin);
        }
    }
    Err(CliError::NotSignedIn)
}
