//! Console state: every resource wired to one session.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::config::{AdminConfig, DataMode};
use crate::error::AppError;
use crate::models::{
    Analytics, AnalyticsPeriod, DashboardStats, FinancialOverview, SidebarSummary,
};
use crate::session::{FileTokenStore, SessionManager, TokenStore};
use crate::sync::{
    CourseModeration, DataResource, NotificationCenter, SettingsEditor, UserDirectory,
    WithdrawalQueue, export_financial_report,
};

/// Everything a front end needs: configuration, session and one resource per
/// domain.
///
/// Cheap to clone; clones share state.
#[derive(Clone, Debug)]
pub struct AdminConsole {
    inner: Arc<ConsoleInner>,
}

#[derive(Debug)]
struct ConsoleInner {
    config: AdminConfig,
    session: SessionManager,
    dashboard: DataResource<DashboardStats>,
    users: UserDirectory,
    notifications: NotificationCenter,
    courses: CourseModeration,
    financial: DataResource<FinancialOverview>,
    withdrawals: WithdrawalQueue,
    analytics: DataResource<Analytics>,
    settings: SettingsEditor,
    sidebar: DataResource<SidebarSummary>,
}

impl AdminConsole {
    /// Build the console from configuration, persisting the token to
    /// `config.token_path`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, AppError> {
        let client = ApiClient::from_config(&config)?;
        let store = Arc::new(FileTokenStore::new(config.token_path.clone()));
        Ok(Self::with_parts(config, client, store))
    }

    /// Build the console from an existing client and token store.
    #[must_use]
    pub fn with_parts(config: AdminConfig, client: ApiClient, store: Arc<dyn TokenStore>) -> Self {
        let mode = config.data_mode();
        let session = SessionManager::new(client, store);
        info!(?mode, base_url = ?config.api_base_url.as_ref().map(url::Url::as_str), "Console initialized");

        let analytics = DataResource::new(session.clone(), mode);
        analytics.set_query(vec![(
            "period".to_string(),
            AnalyticsPeriod::default().to_string(),
        )]);

        Self {
            inner: Arc::new(ConsoleInner {
                dashboard: DataResource::new(session.clone(), mode),
                users: UserDirectory::new(session.clone(), mode, config.page_size),
                notifications: NotificationCenter::new(
                    session.clone(),
                    mode,
                    config.notification_poll_interval,
                ),
                courses: CourseModeration::new(session.clone(), mode),
                financial: DataResource::new(session.clone(), mode),
                withdrawals: WithdrawalQueue::new(session.clone(), mode, config.page_size),
                analytics,
                settings: SettingsEditor::new(session.clone(), mode),
                sidebar: DataResource::new(session.clone(), mode),
                session,
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn mode(&self) -> DataMode {
        self.inner.config.data_mode()
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    #[must_use]
    pub fn dashboard(&self) -> &DataResource<DashboardStats> {
        &self.inner.dashboard
    }

    #[must_use]
    pub fn users(&self) -> &UserDirectory {
        &self.inner.users
    }

    #[must_use]
    pub fn notifications(&self) -> &NotificationCenter {
        &self.inner.notifications
    }

    #[must_use]
    pub fn courses(&self) -> &CourseModeration {
        &self.inner.courses
    }

    #[must_use]
    pub fn financial(&self) -> &DataResource<FinancialOverview> {
        &self.inner.financial
    }

    #[must_use]
    pub fn withdrawals(&self) -> &WithdrawalQueue {
        &self.inner.withdrawals
    }

    #[must_use]
    pub fn analytics(&self) -> &DataResource<Analytics> {
        &self.inner.analytics
    }

    #[must_use]
    pub fn settings(&self) -> &SettingsEditor {
        &self.inner.settings
    }

    #[must_use]
    pub fn sidebar(&self) -> &DataResource<SidebarSummary> {
        &self.inner.sidebar
    }

    /// Switch the analytics window and fetch it.
    pub async fn set_analytics_period(&self, period: AnalyticsPeriod) {
        self.inner
            .analytics
            .set_query(vec![("period".to_string(), period.to_string())]);
        self.inner.analytics.refresh().await;
    }

    /// Refresh every domain concurrently.
    ///
    /// Failures land in each resource's `error`; nothing is returned.
    #[instrument(skip(self))]
    pub async fn refresh_all(&self) {
        let inner = &self.inner;
        futures::join!(
            inner.dashboard.refresh(),
            inner.users.refresh(),
            inner.notifications.refresh(),
            inner.courses.refresh(),
            inner.financial.refresh(),
            inner.withdrawals.refresh(),
            inner.analytics.refresh(),
            inner.settings.refresh(),
            inner.sidebar.refresh(),
        );
        info!("All domains refreshed");
    }

    /// Download the financial report as CSV bytes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Api` if the backend is not configured or the
    /// download fails.
    pub async fn export_financial_report(&self) -> Result<Vec<u8>, AppError> {
        export_financial_report(&self.inner.session).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;
    use crate::sync::DomainData;

    #[tokio::test]
    async fn test_mock_console_serves_placeholders() {
        let config = AdminConfig::default();
        let client = ApiClient::from_config(&config).unwrap();
        let console = AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::new()));

        assert_eq!(console.mode(), DataMode::Mock);
        console.refresh_all().await;

        assert_eq!(console.dashboard().data(), DashboardStats::placeholder());
        assert!(console.users().snapshot().error.is_none());
        assert!(console.sidebar().error().is_none());
        assert!(!console.notifications().snapshot().data.notifications.is_empty());
    }

    #[tokio::test]
    async fn test_export_requires_backend() {
        let config = AdminConfig::default();
        let client = ApiClient::from_config(&config).unwrap();
        let console = AdminConsole::with_parts(config, client, Arc::new(MemoryTokenStore::new()));
        assert!(console.export_financial_report().await.is_err());
    }
}
