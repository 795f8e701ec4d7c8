//! Console configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `YBS_API_BASE_URL` - Backend REST base URL (absent: mock data mode)
//! - `YBS_APP_ENV` - `development` or `production` (default: development)
//! - `YBS_USE_MOCK_DATA` - Force placeholder data in development (default: false)
//! - `YBS_TOKEN_PATH` - File holding the persisted bearer token (default: .ybs/session.json)
//! - `YBS_NOTIFICATION_POLL_SECS` - Notification refresh interval (default: 30)
//! - `YBS_HTTP_TIMEOUT_SECS` - Transport timeout; unset means the client default
//! - `YBS_PAGE_SIZE` - Default page size for paged lists (default: 10, max 100)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (0.0 to 1.0)
//!
//! A production build without `YBS_API_BASE_URL` is rejected: placeholder
//! data must never be shown to staff as if it were real.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_TOKEN_PATH: &str = ".ybs/session.json";
const DEFAULT_POLL_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 10;
const MAX_PAGE_SIZE: u32 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment environment of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnvironment {
    #[default]
    Development,
    Production,
}

impl std::str::FromStr for AppEnvironment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("expected development or production, got {other}")),
        }
    }
}

/// Where read operations get their data from.
///
/// Decided once at startup and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    /// Reads go to the backend.
    Live,
    /// Reads are served from placeholder data without touching the network.
    Mock,
}

impl DataMode {
    /// Returns `true` when reads should hit the backend.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Live)
    }
}

/// Admin console configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// Backend REST base URL, if one is configured
    pub api_base_url: Option<Url>,
    /// Deployment environment
    pub environment: AppEnvironment,
    /// Forces placeholder data even when a backend URL is set (development only)
    pub force_mock_data: bool,
    /// Path of the persisted token file
    pub token_path: PathBuf,
    /// Interval between notification refreshes
    pub notification_poll_interval: Duration,
    /// Optional transport timeout
    pub http_timeout: Option<Duration>,
    /// Default page size for paged lists
    pub page_size: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
}

impl Default for AdminConfig {
    /// Development defaults with no backend, i.e. mock data mode.
    fn default() -> Self {
        Self {
            api_base_url: None,
            environment: AppEnvironment::Development,
            force_mock_data: false,
            token_path: PathBuf::from(DEFAULT_TOKEN_PATH),
            notification_poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
            http_timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or if production is
    /// configured without a backend URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_optional_env("YBS_API_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_base_url(&s))
            .transpose()?;
        let environment = get_env_or_default("YBS_APP_ENV", "development")
            .parse::<AppEnvironment>()
            .map_err(|e| ConfigError::InvalidEnvVar("YBS_APP_ENV".to_string(), e))?;
        let force_mock_data = parse_bool("YBS_USE_MOCK_DATA")?;
        let token_path = PathBuf::from(get_env_or_default("YBS_TOKEN_PATH", DEFAULT_TOKEN_PATH));

        let poll_secs = get_env_or_default("YBS_NOTIFICATION_POLL_SECS", "30")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("YBS_NOTIFICATION_POLL_SECS".to_string(), e.to_string())
            })?;
        if poll_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "YBS_NOTIFICATION_POLL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let http_timeout = get_optional_env("YBS_HTTP_TIMEOUT_SECS")
            .map(|s| {
                s.parse::<u64>().map(Duration::from_secs).map_err(|e| {
                    ConfigError::InvalidEnvVar("YBS_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
                })
            })
            .transpose()?;

        let page_size = get_env_or_default("YBS_PAGE_SIZE", "10")
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar("YBS_PAGE_SIZE".to_string(), e.to_string()))?;
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(ConfigError::InvalidEnvVar(
                "YBS_PAGE_SIZE".to_string(),
                format!("must be between 1 and {MAX_PAGE_SIZE}"),
            ));
        }

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        let config = Self {
            api_base_url,
            environment,
            force_mock_data,
            token_path,
            notification_poll_interval: Duration::from_secs(poll_secs),
            http_timeout,
            page_size,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
        };
        config.validate()?;
        Ok(config)
    }

    /// Config pointing at a live backend with development defaults.
    ///
    /// Used by tests and by the CLI `--api-url` override.
    #[must_use]
    pub fn live(api_base_url: Url) -> Self {
        Self {
            api_base_url: Some(with_trailing_slash(api_base_url)),
            ..Self::default()
        }
    }

    /// Check cross-variable constraints.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if production has no backend URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment == AppEnvironment::Production && self.api_base_url.is_none() {
            return Err(ConfigError::MissingEnvVar("YBS_API_BASE_URL".to_string()));
        }
        if self.environment == AppEnvironment::Production && self.force_mock_data {
            return Err(ConfigError::InvalidEnvVar(
                "YBS_USE_MOCK_DATA".to_string(),
                "mock data cannot be forced in production".to_string(),
            ));
        }
        Ok(())
    }

    /// Derive the data mode for this process.
    ///
    /// Reads are live only when a backend URL is configured and mock data is
    /// not forced.
    #[must_use]
    pub const fn data_mode(&self) -> DataMode {
        if self.api_base_url.is_some() && !self.force_mock_data {
            DataMode::Live
        } else {
            DataMode::Mock
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag; unset means `false`.
fn parse_bool(key: &str) -> Result<bool, ConfigError> {
    match get_optional_env(key).as_deref().map(str::trim) {
        None | Some("") => Ok(false),
        Some(v) if v.eq_ignore_ascii_case("true") || v == "1" => Ok(true),
        Some(v) if v.eq_ignore_ascii_case("false") || v == "0" => Ok(false),
        Some(v) => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected true/false, got {v}"),
        )),
    }
}

/// Parse and normalize the backend base URL.
///
/// A trailing slash is enforced so that joining relative endpoint paths keeps
/// any path prefix (e.g. `https://api.ybs.com/v1/`).
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for a malformed URL or a scheme other
/// than `http`/`https`.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("YBS_API_BASE_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "YBS_API_BASE_URL".to_string(),
            format!("unsupported scheme {}", url.scheme()),
        ));
    }
    Ok(with_trailing_slash(url))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_mock_mode() {
        let config = AdminConfig::default();
        assert_eq!(config.data_mode(), DataMode::Mock);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_live_mode_requires_url() {
        let config = AdminConfig::live(Url::parse("http://localhost:4000/api/").unwrap());
        assert_eq!(config.data_mode(), DataMode::Live);
    }

    #[test]
    fn test_forced_mock_wins_over_url() {
        let config = AdminConfig {
            force_mock_data: true,
            ..AdminConfig::live(Url::parse("http://localhost:4000/").unwrap())
        };
        assert_eq!(config.data_mode(), DataMode::Mock);
    }

    #[test]
    fn test_production_without_url_is_rejected() {
        let config = AdminConfig {
            environment: AppEnvironment::Production,
            ..AdminConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingEnvVar(var)) if var == "YBS_API_BASE_URL"
        ));
    }

    #[test]
    fn test_parse_base_url_adds_trailing_slash() {
        let url = parse_base_url("https://api.ybs.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.ybs.com/v1/");
        assert_eq!(url.join("admin/users").unwrap().path(), "/v1/admin/users");
    }

    #[test]
    fn test_live_keeps_path_prefix() {
        let config = AdminConfig::live(Url::parse("http://h/api/v1").unwrap());
        let base = config.api_base_url.unwrap();
        assert_eq!(
            base.join(crate::api::endpoints::DASHBOARD_STATS).unwrap().as_str(),
            "http://h/api/v1/admin/dashboard/stats"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://ybs.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_app_environment_from_str() {
        assert_eq!("PROD".parse::<AppEnvironment>(), Ok(AppEnvironment::Production));
        assert_eq!("dev".parse::<AppEnvironment>(), Ok(AppEnvironment::Development));
        assert!("staging".parse::<AppEnvironment>().is_err());
    }
}
