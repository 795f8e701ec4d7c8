//! Transport-level errors.

use thiserror::Error;

/// Errors that can occur when talking to the platform backend.
///
/// Values are cheap to clone so that a data resource can keep its last error
/// next to its last good payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No backend base URL is configured (mock data mode).
    #[error("Backend URL is not configured")]
    NotConfigured,

    /// The request never produced an HTTP response (DNS, refused, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered 401; the session is gone.
    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("session expired"))]
    Unauthorized(Option<String>),

    /// The backend rejected the request (4xx or `success: false`).
    ///
    /// `message` is empty when the backend gave no reason.
    #[error("Request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message supplied by the backend.
        message: String,
    },

    /// The backend failed to process the request (5xx).
    #[error("Server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message supplied by the backend, if any.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    Decode(String),

    /// The request could not be built (bad path or unserializable body).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Returns `true` if this error means the session is no longer valid.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Message suitable for showing to an admin.
    ///
    /// Backend-supplied messages are passed through verbatim; transport
    /// failures collapse into a generic message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => "Backend is not configured".to_string(),
            Self::Network(_) => "Network error occurred".to_string(),
            Self::Unauthorized(message) => message
                .clone()
                .unwrap_or_else(|| "Your session has expired. Please sign in again.".to_string()),
            Self::Rejected { message, .. } if !message.is_empty() => message.clone(),
            Self::Rejected { .. } => "Request failed".to_string(),
            Self::Server { message, .. } if !message.is_empty() => message.clone(),
            Self::Server { .. } => "Server error, please try again".to_string(),
            Self::Decode(_) => "Unexpected response from server".to_string(),
            Self::InvalidRequest(message) => message.clone(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
