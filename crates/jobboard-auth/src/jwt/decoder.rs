//! Session token decoders.
//!
//! The server is the trust boundary, so the default decoder reads claims
//! without checking the signature. A verifying decoder can be swapped in
//! through configuration; callers only see [`ClaimsDecoder`].

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};
use tracing::debug;

use jobboard_core::config::AuthConfig;

use super::claims::{TokenClaims, TokenIdentity};
use crate::error::TokenError;

/// Reads claims out of a session token.
pub trait ClaimsDecoder: Send + Sync + std::fmt::Debug {
    /// Decode all claims, reporting why the token is unusable.
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError>;

    /// The `(role, user_id)` pair, with empty strings when the token is
    /// unusable or a claim is absent. Never fails.
    fn identity(&self, token: &str) -> TokenIdentity {
        match self.decode(token) {
            Ok(claims) => claims.identity(),
            Err(e) => {
                debug!(error = %e, "Token claims unreadable, using empty identity");
                TokenIdentity::default()
            }
        }
    }
}

/// Decodes the payload segment without verifying the signature.
#[derive(Debug, Clone, Default)]
pub struct UnverifiedDecoder {
    /// Reject tokens whose `exp` claim is in the past.
    reject_expired: bool,
}

impl UnverifiedDecoder {
    /// Creates a decoder that accepts expired tokens.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a decoder that rejects expired tokens.
    pub fn rejecting_expired() -> Self {
        Self {
            reject_expired: true,
        }
    }
}

impl ClaimsDecoder for UnverifiedDecoder {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(TokenError::Malformed(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| TokenError::Payload(e.to_string()))?;
        let Value::Object(map) = value else {
            return Err(TokenError::Payload("expected an object".to_string()));
        };

        let claims = TokenClaims::from_map(&map);
        if self.reject_expired && claims.is_expired() {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Verifies an HS256 signature before reading claims.
///
/// Any token that fails verification is rejected, including ones that are
/// malformed or signed with another algorithm.
#[derive(Clone)]
pub struct VerifyingDecoder {
    /// HMAC secret key for verification.
    decoding_key: DecodingKey,
    /// Validation configuration.
    validation: Validation,
}

impl std::fmt::Debug for VerifyingDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifyingDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl VerifyingDecoder {
    /// Creates a decoder for tokens signed with `secret`.
    pub fn new(secret: &[u8], reject_expired: bool) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = reject_expired;
        validation.leeway = 5; // seconds of clock skew

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }
}

impl ClaimsDecoder for VerifyingDecoder {
    fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        // A token this decoder cannot verify is never trusted, whatever the cause.
        let data = decode::<Map<String, Value>>(token.trim(), &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => {
                    debug!(error = %e, "Token failed verification");
                    TokenError::Signature
                }
            })?;

        Ok(TokenClaims::from_map(&data.claims))
    }
}

/// Select the decoder described by `config`.
pub fn build_decoder(config: &AuthConfig) -> Arc<dyn ClaimsDecoder> {
    match (config.verify_signature, config.jwt_secret.as_deref()) {
        (true, Some(secret)) if !secret.is_empty() => {
            Arc::new(VerifyingDecoder::new(secret.as_bytes(), config.reject_expired))
        }
        _ if config.reject_expired => Arc::new(UnverifiedDecoder::rejecting_expired()),
        _ => Arc::new(UnverifiedDecoder::new()),
    }
}

/// `(role, user_id)` of `token` read without signature verification.
pub fn extract_identity(token: &str) -> TokenIdentity {
    UnverifiedDecoder::new().identity(token)
}
