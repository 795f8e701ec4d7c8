//! `ybs users ...`.

use ybs_admin::AdminConsole;
use ybs_admin::AppError;
use ybs_admin::models::{NewUser, UserQuery, UserUpdate};
use ybs_core::{Email, UserId, UserStatus};

use super::{CliError, require_admin};
use crate::output;

fn parse_email(raw: &str) -> Result<Email, CliError> {
    Email::parse(raw).map_err(|e| CliError::App(AppError::Validation(e.into())))
}

pub async fn list(
    console: &AdminConsole,
    page: u32,
    limit: Option<u32>,
    search: Option<String>,
    status: Option<UserStatus>,
) -> Result<(), CliError> {
    require_admin(console).await?;
    let users = console.users();
    let query = UserQuery {
        page,
        limit: limit.unwrap_or(users.query().limit),
        search,
        status,
    };
    let snapshot = users.apply_query(query).await?;
    output::snapshot(&snapshot)
}

pub async fn get(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    let user = console.users().get(&UserId::new(id)).await?;
    output::json(&user)
}

pub async fn create(
    console: &AdminConsole,
    email: &str,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    referred_by: Option<String>,
) -> Result<(), CliError> {
    require_admin(console).await?;
    let user = NewUser {
        email: parse_email(email)?,
        first_name,
        last_name,
        phone,
        referred_by,
    };
    console.users().create(user).await?;
    output::line("User created");
    Ok(())
}

pub async fn update(
    console: &AdminConsole,
    id: &str,
    email: Option<&str>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
) -> Result<(), CliError> {
    require_admin(console).await?;
    let update = UserUpdate {
        email: email.map(parse_email).transpose()?,
        first_name,
        last_name,
        phone,
    };
    console.users().update(&UserId::new(id), update).await?;
    output::line("User updated");
    Ok(())
}

pub async fn delete(console: &AdminConsole, id: &str) -> Result<(), CliError> {
    require_admin(console).await?;
    console.users().delete(&UserId::new(id)).await?;
    output::line("User deleted");
    Ok(())
}

pub async fn set_status(console: &AdminConsole, id: &str, status: UserStatus) -> Result<(), CliError> {
    require_admin(console).await?;
    console.users().set_status(&UserId::new(id), status).await?;
    output::line(&format!("User is now {status}"));
    Ok(())
}
