//! Response envelope used by every backend endpoint.
//!
//! The backend wraps payloads as `{success, message, error, data}`. Decoding
//! happens here once, so callers only ever see `Result<T, ApiError>`.

use serde::Deserialize;

use super::ApiError;

/// Raw `{success, message, error, data}` envelope.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend considers the call successful.
    pub success: bool,
    /// Human-readable status message.
    pub message: Option<String>,
    /// Error text on failure (some endpoints use this instead of `message`).
    pub error: Option<String>,
    /// Domain payload.
    pub data: Option<T>,
}

/// Acknowledgement of a mutation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ack {
    /// Backend status message, if any.
    pub message: Option<String>,
    /// Updated entity, when the endpoint returns one.
    pub data: Option<serde_json::Value>,
}

/// Body shape of a non-2xx response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, tolerating non-JSON bodies.
    pub(crate) fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Backend message, `error` first, then `message`.
    pub(crate) fn into_message(self) -> Option<String> {
        self.error
            .filter(|s| !s.is_empty())
            .or_else(|| self.message.filter(|s| !s.is_empty()))
    }
}

impl<T> ApiEnvelope<T> {
    fn failure(self, status: u16) -> ApiError {
        let message = ErrorBody {
            error: self.error,
            message: self.message,
        }
        .into_message()
        .unwrap_or_default();
        ApiError::Rejected { status, message }
    }

    /// Extract the payload of a successful response.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for `success: false` and
    /// `ApiError::Decode` when a successful response carries no data.
    pub fn into_data(self, status: u16) -> Result<T, ApiError> {
        if !self.success {
            return Err(self.failure(status));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("response has no data".to_string()))
    }
}

impl ApiEnvelope<serde_json::Value> {
    /// Convert a mutation response into an [`Ack`].
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for `success: false`.
    pub fn into_ack(self, status: u16) -> Result<Ack, ApiError> {
        if !self.success {
            return Err(self.failure(status));
        }
        Ok(Ack {
            message: self.message,
            data: self.data.filter(|v| !v.is_null()),
        })
    }
}
