//! Raw HTTP response as seen by callers.

use serde::de::DeserializeOwned;

use crate::error::{ApiError, ApiResult};

/// Status code and body text of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text (empty for bodiless responses).
    pub body: String,
}

impl RawResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Deserialize the body regardless of status.
    ///
    /// An empty body is read as JSON `null`, so `()` and `Option<T>`
    /// targets accept `204 No Content`.
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        let text = if self.body.trim().is_empty() {
            "null"
        } else {
            self.body.as_str()
        };
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Deserialize a 2xx body, or fail with [`ApiError::Status`].
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        if !self.is_success() {
            return Err(ApiError::Status {
                status: self.status,
                body: self.body,
            });
        }
        self.json()
    }
}
