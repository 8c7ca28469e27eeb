//! Token decoding configuration.

use serde::{Deserialize, Serialize};

/// Controls how the client reads claims out of the session token.
///
/// The server is the trust boundary, so by default claims are decoded
/// without checking the signature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Verify the HS256 signature before trusting any claim.
    #[serde(default)]
    pub verify_signature: bool,
    /// Shared secret used when `verify_signature` is enabled.
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Treat tokens whose `exp` claim lies in the past as malformed.
    #[serde(default)]
    pub reject_expired: bool,
}
