//! Backend REST client.
//!
//! Every request goes through [`ApiClient::execute`], which attaches the
//! bearer token, maps HTTP failures onto [`ApiError`], and reports 401s to
//! the credential source so the session can be dropped in one place.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};
use url::Url;

use super::envelope::{Ack, ApiEnvelope, ErrorBody};
use super::ApiError;
use crate::config::AdminConfig;

/// Supplies credentials to the transport and hears about session loss.
///
/// Implemented by the session manager; the transport never owns session state.
pub trait CredentialSource: Send + Sync {
    /// Current bearer token, if any.
    fn bearer_token(&self) -> Option<SecretString>;

    /// Called when any authenticated request comes back 401.
    fn on_unauthorized(&self);
}

/// Backend REST client.
///
/// Cheap to clone; clones share the connection pool and cookie store.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
    credentials: Option<Arc<dyn CredentialSource>>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Option<Url>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_ref().map(Url::as_str))
            .field("has_credentials", &self.credentials.is_some())
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the given base URL.
    ///
    /// A `None` base URL produces a client whose requests all fail with
    /// [`ApiError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if the HTTP client cannot be built.
    pub fn new(base_url: Option<Url>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(concat!("ybs-admin/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            inner: Arc::new(ApiClientInner { http, base_url }),
            credentials: None,
        })
    }

    /// Create a client from console configuration.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidRequest` if the HTTP client cannot be built.
    pub fn from_config(config: &AdminConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base_url.clone(), config.http_timeout)
    }

    /// Return a clone of this client that authenticates through `credentials`.
    #[must_use]
    pub fn with_credentials(&self, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            credentials: Some(credentials),
        }
    }

    /// Configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.inner.base_url.as_ref()
    }

    /// Returns `true` if a base URL is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.inner.base_url.is_some()
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    /// `GET` a JSON payload.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an envelope
    /// with `success: false`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        decode_data(response).await
    }

    /// `POST` a JSON body and decode the payload of the response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an envelope
    /// with `success: false`.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to encode body: {e}")))?;
        let response = self.execute(Method::POST, path, &[], Some(body)).await?;
        decode_data(response).await
    }

    /// Send a mutation without a body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an envelope
    /// with `success: false`.
    pub async fn command(&self, method: Method, path: &str) -> Result<Ack, ApiError> {
        let response = self.execute(method, path, &[], None).await?;
        decode_ack(response).await
    }

    /// Send a mutation with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, non-2xx status, or an envelope
    /// with `success: false`.
    pub async fn command_with<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Ack, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to encode body: {e}")))?;
        let response = self.execute(method, path, &[], Some(body)).await?;
        decode_ack(response).await
    }

    /// Download a binary export (octet-stream).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-2xx status.
    pub async fn download(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Vec<u8>, ApiError> {
        let response = self.execute(Method::GET, path, query, None).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    // =========================================================================
    // Request execution
    // =========================================================================

    fn url(&self, path: &str, query: &[(String, String)]) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_ref().ok_or(ApiError::NotConfigured)?;
        let mut url = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("{path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Send a request and return the response if its status is 2xx.
    #[instrument(skip(self, query, body), fields(method = %method, path = %path))]
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.url(path, query)?;

        let mut request = self.inner.http.request(method, url);
        if let Some(token) = self.credentials.as_ref().and_then(|c| c.bearer_token()) {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed before a response arrived");
            ApiError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = ErrorBody::parse(&text).into_message();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            warn!("Backend returned 401, dropping session");
            if let Some(credentials) = &self.credentials {
                credentials.on_unauthorized();
            }
            return Err(ApiError::Unauthorized(message));
        }

        warn!(status = status.as_u16(), message = ?message, "Backend returned an error");
        if status.is_server_error() {
            Err(ApiError::Server {
                status: status.as_u16(),
                message: message.unwrap_or_default(),
            })
        } else {
            Err(ApiError::Rejected {
                status: status.as_u16(),
                message: message.unwrap_or_default(),
            })
        }
    }
}

async fn decode_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    let envelope: ApiEnvelope<T> = response.json().await?;
    envelope.into_data(status)
}

async fn decode_ack(response: reqwest::Response) -> Result<Ack, ApiError> {
    let status = response.status().as_u16();
    let text = response.text().await?;
    // Some mutation endpoints answer 204 with no body at all.
    if text.trim().is_empty() {
        return Ok(Ack::default());
    }
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(&text)?;
    envelope.into_ack(status)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct StaticToken {
        token: Mutex<Option<String>>,
        expired_calls: AtomicUsize,
    }

    impl StaticToken {
        fn new(token: &str) -> Arc<Self> {
            Arc::new(Self {
                token: Mutex::new(Some(token.to_string())),
                expired_calls: AtomicUsize::new(0),
            })
        }
    }

    impl CredentialSource for StaticToken {
        fn bearer_token(&self) -> Option<SecretString> {
            self.token.lock().clone().map(SecretString::from)
        }

        fn on_unauthorized(&self) {
            self.expired_calls.fetch_add(1, Ordering::SeqCst);
            *self.token.lock() = None;
        }
    }

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(Some(Url::parse(&server.uri()).unwrap()), None).unwrap()
    }

    #[tokio::test]
    async fn test_unconfigured_client_never_sends() {
        let client = ApiClient::new(None, None).unwrap();
        let result: Result<serde_json::Value, _> = client.get("admin/dashboard/stats", &[]).await;
        assert_eq!(result.unwrap_err(), ApiError::NotConfigured);
    }

    #[tokio::test]
    async fn test_get_attaches_bearer_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/users"))
            .and(query_param("page", "2"))
            .and(header("authorization", "Bearer tok_123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": [1, 2, 3]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).with_credentials(StaticToken::new("tok_123"));
        let data: Vec<u32> = client
            .get("admin/users", &[("page".to_string(), "2".to_string())])
            .await
            .unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_unauthorized_notifies_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/settings"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"success": false, "message": "Token expired"})),
            )
            .mount(&server)
            .await;

        let credentials = StaticToken::new("stale");
        let client = client_for(&server).with_credentials(credentials.clone());
        let err = client
            .get::<serde_json::Value>("admin/settings", &[])
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Unauthorized(Some("Token expired".to_string())));
        assert_eq!(credentials.expired_calls.load(Ordering::SeqCst), 1);
        assert!(credentials.bearer_token().is_none());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(path("/conflict"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({"message": "Email already exists"})))
            .mount(&server)
            .await;
        Mock::given(path("/boom"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(
            client.command(Method::POST, "conflict").await.unwrap_err(),
            ApiError::Rejected {
                status: 409,
                message: "Email already exists".to_string()
            }
        );
        assert_eq!(
            client.command(Method::DELETE, "boom").await.unwrap_err(),
            ApiError::Server {
                status: 500,
                message: String::new()
            }
        );
    }

    #[tokio::test]
    async fn test_command_accepts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/admin/notifications/n1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let ack = client_for(&server)
            .command(Method::DELETE, "/admin/notifications/n1")
            .await
            .unwrap();
        assert_eq!(ack, Ack::default());
    }

    #[tokio::test]
    async fn test_base_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(path("/api/v1/admin/sidebar"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": 7})))
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
        let client = ApiClient::new(Some(base), None).unwrap();
        let value: u32 = client.get("admin/sidebar", &[]).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let base = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        let client = ApiClient::new(Some(base), None).unwrap();
        let err = client.get::<u32>("admin/sidebar", &[]).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert_eq!(err.user_message(), "Network error occurred");
    }
}
