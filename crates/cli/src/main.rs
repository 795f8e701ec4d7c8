//! YBS admin console CLI.
//!
//! # Usage
//!
//! ```bash
//! # Sign in (the token is kept in YBS_TOKEN_PATH)
//! ybs login -e admin@ybs.com
//!
//! # Show a domain as JSON
//! ybs show dashboard
//! ybs show analytics --period 90d
//!
//! # Moderate
//! ybs users list --status suspended
//! ybs withdrawals reject wdr_501 --reason "Bank details do not match"
//! ybs courses approve crs_201
//!
//! # Export the financial report
//! ybs export -o report.csv
//! ```
//!
//! Without `YBS_API_BASE_URL` (or with `--mock`) every read is served from
//! placeholder data.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use ybs_admin::{AdminConfig, AdminConsole};
use ybs_core::{UserStatus, WithdrawalStatus};

mod commands;
mod output;

use commands::CliError;

#[derive(Parser)]
#[command(name = "ybs")]
#[command(author, version, about = "YBS admin console")]
struct Cli {
    /// Backend base URL (overrides `YBS_API_BASE_URL`)
    #[arg(long, global = true, value_parser = ybs_admin::config::parse_base_url)]
    api_url: Option<Url>,

    /// Serve reads from placeholder data
    #[arg(long, global = true)]
    mock: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and keep the session token
    Login {
        /// Admin email address
        #[arg(short, long)]
        email: Option<String>,

        /// Admin password
        #[arg(short, long, env = "YBS_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Use an existing access token instead of email and password
        #[arg(long, conflicts_with_all = ["email", "password"])]
        token: Option<String>,
    },
    /// Sign out and forget the session token
    Logout,
    /// Show the signed-in admin
    Whoami,
    /// Print one domain's data as JSON
    Show {
        /// dashboard, users, notifications, courses, financial, analytics, settings or sidebar
        domain: String,

        /// Analytics period (7d, 30d, 90d, 1y)
        #[arg(long)]
        period: Option<String>,
    },
    /// Manage platform users
    Users {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Read and clear notifications
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Moderate submitted courses
    Courses {
        #[command(subcommand)]
        action: CourseAction,
    },
    /// Process withdrawal requests
    Withdrawals {
        #[command(subcommand)]
        action: WithdrawalAction,
    },
    /// View or change system settings (super admin)
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Download the financial report as CSV
    Export {
        /// Output file
        #[arg(short, long, default_value = "financial-report.csv")]
        output: PathBuf,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List users
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
        /// Search name, email or referral code
        #[arg(short, long)]
        search: Option<String>,
        /// active, inactive, suspended or banned
        #[arg(long)]
        status: Option<UserStatus>,
    },
    /// Show one user
    Get { id: String },
    /// Create a user
    Create {
        #[arg(short, long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        /// Referral code of the referring user
        #[arg(long)]
        referred_by: Option<String>,
    },
    /// Update profile fields
    Update {
        id: String,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Delete a user
    Delete { id: String },
    /// Change account status
    Status { id: String, status: UserStatus },
}

#[derive(Subcommand)]
enum NotificationAction {
    /// List notifications
    List,
    /// Mark one notification read
    Read { id: String },
    /// Mark every notification read
    ReadAll,
    /// Delete a notification
    Delete { id: String },
    /// Poll and print the unread count until interrupted
    Watch,
}

#[derive(Subcommand)]
enum CourseAction {
    /// List courses
    List,
    /// Approve a course
    Approve { id: String },
    /// Reject a course
    Reject {
        id: String,
        #[arg(short, long)]
        reason: String,
    },
    /// Send a course back to its instructor
    Revise {
        id: String,
        #[arg(short, long)]
        notes: String,
    },
}

#[derive(Subcommand)]
enum WithdrawalAction {
    /// List withdrawal requests
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// pending, approved, rejected or completed
        #[arg(long)]
        status: Option<WithdrawalStatus>,
    },
    /// Approve a withdrawal
    Approve { id: String },
    /// Reject a withdrawal
    Reject {
        id: String,
        #[arg(short, long)]
        reason: String,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show current settings
    Show,
    /// Change settings
    Set(commands::settings::SettingsArgs),
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Route WARN/ERROR to Sentry events, INFO/DEBUG to breadcrumbs.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        tracing::Level::TRACE => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ybs_admin=info,ybs=info".into());

    // JSON for log shippers, text for a terminal
    let json = std::env::var_os("YBS_LOG_JSON").is_some();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!("{e}");
            std::process::exit(2);
        }
    };

    let _sentry_guard = init_sentry(&config);
    init_tracing();

    if let Err(e) = run(cli, config).await {
        e.report();
        tracing::error!("{}", e.user_message());
        std::process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<AdminConfig, CliError> {
    let mut config = AdminConfig::from_env().map_err(ybs_admin::AppError::from)?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = Some(url.clone());
    }
    if cli.mock {
        config.force_mock_data = true;
    }
    config.validate().map_err(ybs_admin::AppError::from)?;
    Ok(config)
}

async fn run(cli: Cli, config: AdminConfig) -> Result<(), CliError> {
    let console = AdminConsole::new(config)?;

    match cli.command {
        Commands::Login {
            email,
            password,
            token,
        } => commands::auth::login(&console, email, password, token).await,
        Commands::Logout => commands::auth::logout(&console).await,
        Commands::Whoami => commands::auth::whoami(&console).await,
        Commands::Show { domain, period } => {
            commands::show::show(&console, &domain, period.as_deref()).await
        }
        Commands::Users { action } => match action {
            UserAction::List {
                page,
                limit,
                search,
                status,
            } => commands::users::list(&console, page, limit, search, status).await,
            UserAction::Get { id } => commands::users::get(&console, &id).await,
            UserAction::Create {
                email,
                first_name,
                last_name,
                phone,
                referred_by,
            } => {
                commands::users::create(&console, &email, first_name, last_name, phone, referred_by)
                    .await
            }
            UserAction::Update {
                id,
                email,
                first_name,
                last_name,
                phone,
            } => {
                commands::users::update(&console, &id, email.as_deref(), first_name, last_name, phone)
                    .await
            }
            UserAction::Delete { id } => commands::users::delete(&console, &id).await,
            UserAction::Status { id, status } => {
                commands::users::set_status(&console, &id, status).await
            }
        },
        Commands::Notifications { action } => match action {
            NotificationAction::List => commands::notifications::list(&console).await,
            NotificationAction::Read { id } => commands::notifications::read(&console, &id).await,
            NotificationAction::ReadAll => commands::notifications::read_all(&console).await,
            NotificationAction::Delete { id } => {
                commands::notifications::delete(&console, &id).await
            }
            NotificationAction::Watch => commands::notifications::watch(&console).await,
        },
        Commands::Courses { action } => match action {
            CourseAction::List => commands::courses::list(&console).await,
            CourseAction::Approve { id } => commands::courses::approve(&console, &id).await,
            CourseAction::Reject { id, reason } => {
                commands::courses::reject(&console, &id, &reason).await
            }
            CourseAction::Revise { id, notes } => {
                commands::courses::revise(&console, &id, &notes).await
            }
        },
        Commands::Withdrawals { action } => match action {
            WithdrawalAction::List { page, status } => {
                commands::withdrawals::list(&console, page, status).await
            }
            WithdrawalAction::Approve { id } => {
                commands::withdrawals::approve(&console, &id).await
            }
            WithdrawalAction::Reject { id, reason } => {
                commands::withdrawals::reject(&console, &id, &reason).await
            }
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(&console).await,
            SettingsAction::Set(args) => commands::settings::set(&console, args).await,
        },
        Commands::Export { output } => commands::export::export(&console, &output).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_users_list() {
        let cli = Cli::try_parse_from(["ybs", "users", "list", "--status", "banned", "--page", "2"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Users {
                action: UserAction::List {
                    page: 2,
                    status: Some(UserStatus::Banned),
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_api_url_keeps_path_prefix() {
        let cli = Cli::try_parse_from(["ybs", "--api-url", "http://h/api/v1", "whoami"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(cli.api_url.map(String::from).as_deref(), Some("http://h/api/v1/"));
    }

    #[test]
    fn test_api_url_rejects_other_schemes() {
        assert!(Cli::try_parse_from(["ybs", "--api-url", "ftp://h/", "whoami"]).is_err());
    }

    #[test]
    fn test_login_token_conflicts_with_email() {
        assert!(Cli::try_parse_from(["ybs", "login", "--token", "t", "-e", "a@b.co"]).is_err());
    }
}
