//! Token decoding errors.

use thiserror::Error;

use jobboard_core::error::AppError;

/// Why claims could not be read from a session token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token string was empty.
    #[error("token is empty")]
    Empty,
    /// The token is not three dot-separated segments.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// The payload segment is not valid base64url.
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    /// The payload is not a JSON object.
    #[error("token payload is not a JSON object: {0}")]
    Payload(String),
    /// The token could not be verified against the configured secret.
    #[error("token signature could not be verified")]
    Signature,
    /// The `exp` claim is in the past.
    #[error("token has expired")]
    Expired,
}

impl TokenError {
    /// Whether the token was readable but must not be trusted.
    ///
    /// Unreadable tokens degrade to empty claims; rejected tokens abort the
    /// login or registration that produced them.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Signature | Self::Expired)
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::authentication(err.to_string())
    }
}
