//! Claims carried in the session token payload.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use jobboard_core::types::Role;

/// Claims read from a session token.
///
/// Every field is optional: the payload is parsed field by field so a
/// claim of an unexpected type leaves that field empty instead of
/// failing the whole token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User id (`user_id` claim).
    pub user_id: Option<String>,
    /// Role string (`role` claim).
    pub role: Option<String>,
    /// Account email (`email` claim).
    pub email: Option<String>,
    /// Subject (`sub` claim).
    pub sub: Option<String>,
    /// Issued-at, seconds since epoch (`iat` claim).
    pub iat: Option<i64>,
    /// Expiration, seconds since epoch (`exp` claim).
    pub exp: Option<i64>,
    /// Token kind (`type` claim), e.g. `"access"`.
    pub token_type: Option<String>,
}

/// The two claims the session layer persists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIdentity {
    /// `role` claim, empty if absent.
    pub role: String,
    /// `user_id` claim, empty if absent.
    pub user_id: String,
}

impl TokenIdentity {
    /// The typed role, if the claim names a known role.
    pub fn role(&self) -> Option<Role> {
        Role::parse_claim(&self.role)
    }
}

impl TokenClaims {
    /// Build claims from a decoded JSON payload object.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            user_id: string_claim(map, "user_id"),
            role: string_claim(map, "role"),
            email: string_claim(map, "email"),
            sub: string_claim(map, "sub"),
            iat: numeric_claim(map, "iat"),
            exp: numeric_claim(map, "exp"),
            token_type: string_claim(map, "type"),
        }
    }

    /// The persisted pair, with empty strings for absent claims.
    pub fn identity(&self) -> TokenIdentity {
        TokenIdentity {
            role: self.role.clone().unwrap_or_default(),
            user_id: self.user_id.clone().unwrap_or_default(),
        }
    }

    /// Returns the expiration as a `DateTime<Utc>`, if present.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether `exp` lies in the past. Tokens without `exp` never expire.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether `exp` lies before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.is_some_and(|exp| now.timestamp() >= exp)
    }
}

/// Strings are taken as-is; numbers and booleans are stringified.
fn string_claim(map: &Map<String, Value>, name: &str) -> Option<String> {
    match map.get(name)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn numeric_claim(map: &Map<String, Value>, name: &str) -> Option<i64> {
    let value = map.get(name)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}
