//! System settings with validated updates.

use reqwest::Method;
use tracing::{info, instrument};

use super::resource::{DataResource, ResourceSnapshot};
use crate::api::endpoints;
use crate::config::DataMode;
use crate::error::AppError;
use crate::models::{SettingsUpdate, SystemSettings};
use crate::session::SessionManager;
use crate::validation::validate_settings;

#[derive(Debug)]
pub struct SettingsEditor {
    resource: DataResource<SystemSettings>,
    session: SessionManager,
}

impl SettingsEditor {
    #[must_use]
    pub fn new(session: SessionManager, mode: DataMode) -> Self {
        Self {
            resource: DataResource::new(session.clone(), mode),
            session,
        }
    }

    #[must_use]
    pub const fn resource(&self) -> &DataResource<SystemSettings> {
        &self.resource
    }

    #[must_use]
    pub fn snapshot(&self) -> ResourceSnapshot<SystemSettings> {
        self.resource.snapshot()
    }

    pub async fn refresh(&self) -> ResourceSnapshot<SystemSettings> {
        self.resource.refresh().await
    }

    /// Save changed settings, then refresh.
    ///
    /// The update is checked against the settings currently shown.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` without sending when the update is
    /// empty or inconsistent, or `AppError::Api` if the backend refuses.
    #[instrument(skip_all)]
    pub async fn update(&self, update: &SettingsUpdate) -> Result<(), AppError> {
        validate_settings(update, &self.resource.data())?;
        self.session
            .client()
            .command_with(Method::PUT, endpoints::SETTINGS, update)
            .await?;
        info!("System settings updated");
        self.resource.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiClient;
    use crate::session::MemoryTokenStore;
    use crate::validation::ValidationError;
    use serde_json::json;
    use std::sync::Arc;
    use url::Url;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn editor(server: &MockServer) -> SettingsEditor {
        let client = ApiClient::new(Some(Url::parse(&server.uri()).unwrap()), None).unwrap();
        let session = SessionManager::new(client, Arc::new(MemoryTokenStore::with_token("tok")));
        SettingsEditor::new(session, DataMode::Live)
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/admin/settings"))
            .and(body_json(json!({"maintenanceMode": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/admin/settings"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let settings = editor(&server);
        settings
            .update(&SettingsUpdate {
                maintenance_mode: Some(true),
                ..SettingsUpdate::default()
            })
            .await
            .unwrap();
        // The follow-up refresh failed; the mutation still succeeded.
        assert!(settings.snapshot().error.is_some());
    }

    #[tokio::test]
    async fn test_empty_update_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = editor(&server)
            .update(&SettingsUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ValidationError::EmptyUpdate)));
    }
}
