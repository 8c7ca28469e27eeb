//! API client error types.

use std::time::Duration;

use thiserror::Error;

use jobboard_core::error::{AppError, ErrorKind};

/// Convenience alias used by every fallible client call.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The resolved URL could not be parsed.
    #[error("invalid request URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL after joining with the base address.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("failed to encode request body: {0}")]
    Encode(String),

    /// DNS failure, refused connection, reset, or any other transport fault.
    #[error("network error calling {url}: {reason}")]
    Network {
        /// The URL that was being called.
        url: String,
        /// Transport message.
        reason: String,
    },

    /// No complete response arrived before the deadline.
    #[error("request to {url} timed out after {after:?}")]
    Timeout {
        /// The URL that was being called.
        url: String,
        /// The configured deadline.
        after: Duration,
    },

    /// The server answered with a non-2xx status.
    #[error("server returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// A 2xx body was not the expected JSON shape.
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Tag identifying which [`ApiError`] variant occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// See [`ApiError::InvalidUrl`].
    InvalidUrl,
    /// See [`ApiError::Encode`].
    Encode,
    /// See [`ApiError::Network`].
    Network,
    /// See [`ApiError::Timeout`].
    Timeout,
    /// See [`ApiError::Status`].
    Status,
    /// See [`ApiError::Decode`].
    Decode,
}

impl ApiError {
    /// The variant tag, for callers that only need to branch on the cause.
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            Self::InvalidUrl { .. } => ApiErrorKind::InvalidUrl,
            Self::Encode(_) => ApiErrorKind::Encode,
            Self::Network { .. } => ApiErrorKind::Network,
            Self::Timeout { .. } => ApiErrorKind::Timeout,
            Self::Status { .. } => ApiErrorKind::Status,
            Self::Decode(_) => ApiErrorKind::Decode,
        }
    }

    /// Whether the server never produced a response (network fault or timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self.kind(), ApiErrorKind::Network | ApiErrorKind::Timeout)
    }

    /// HTTP status, when the server did answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn from_transport(url: &str, after: Duration, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
                after,
            }
        } else {
            Self::Network {
                url: url.to_string(),
                reason: err.to_string(),
            }
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        let kind = match err.kind() {
            ApiErrorKind::InvalidUrl => ErrorKind::Validation,
            ApiErrorKind::Encode | ApiErrorKind::Decode => ErrorKind::Serialization,
            ApiErrorKind::Network => ErrorKind::Network,
            ApiErrorKind::Timeout => ErrorKind::Timeout,
            ApiErrorKind::Status => ErrorKind::Http,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let timeout = ApiError::Timeout {
            url: "http://h/api/x".to_string(),
            after: Duration::from_secs(30),
        };
        assert!(timeout.is_transport());
        assert_eq!(timeout.status(), None);

        let status = ApiError::Status {
            status: 401,
            body: String::new(),
        };
        assert!(!status.is_transport());
        assert_eq!(status.status(), Some(401));
    }

    #[test]
    fn test_into_app_error_keeps_distinction() {
        let timeout: AppError = ApiError::Timeout {
            url: "u".to_string(),
            after: Duration::from_secs(1),
        }
        .into();
        assert_eq!(timeout.kind, ErrorKind::Timeout);

        let network: AppError = ApiError::Network {
            url: "u".to_string(),
            reason: "connection refused".to_string(),
        }
        .into();
        assert_eq!(network.kind, ErrorKind::Network);
    }
}
