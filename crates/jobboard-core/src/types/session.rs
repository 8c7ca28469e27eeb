//! Credentials and the persisted session record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// Login payload. Never persisted.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Plain-text password, sent only over the request body.
    pub password: String,
}

impl Credentials {
    /// Build credentials from borrowed strings.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The four fields that together represent "logged in".
///
/// A record only exists when all four are present; a partially written
/// record reads back as no session at all.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Bearer token attached to authenticated requests.
    pub access_token: String,
    /// Refresh token issued alongside the access token. Stored, never used.
    pub refresh_token: String,
    /// User id taken from the access token's claims.
    pub user_id: String,
    /// Role string taken from the access token's claims.
    pub role: String,
}

impl SessionRecord {
    /// Whether every field carries a value.
    pub fn is_complete(&self) -> bool {
        !self.access_token.is_empty()
            && !self.refresh_token.is_empty()
            && !self.user_id.is_empty()
            && !self.role.is_empty()
    }

    /// The typed role, if the stored string is a known role.
    pub fn role(&self) -> Option<Role> {
        Role::parse_claim(&self.role)
    }
}

impl fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionRecord")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("role", &self.role)
            .finish()
    }
}

/// Snapshot of everything the UI needs about the current user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAuthData {
    /// Stored user id, empty if absent.
    pub user_id: String,
    /// Stored role string, empty if absent.
    pub role: String,
    /// Stored access token, empty if absent.
    #[serde(skip_serializing)]
    pub token: String,
    /// Whether an access token is present.
    pub is_authenticated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        SessionRecord {
            access_token: "a.b.c".to_string(),
            refresh_token: "r".to_string(),
            user_id: "42".to_string(),
            role: "employer".to_string(),
        }
    }

    #[test]
    fn test_complete_record() {
        let rec = record();
        assert!(rec.is_complete());
        assert_eq!(rec.role(), Some(Role::Employer));
    }

    #[test]
    fn test_missing_field_is_incomplete() {
        let mut rec = record();
        rec.refresh_token.clear();
        assert!(!rec.is_complete());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("a@b.c", "hunter2");
        assert!(!format!("{creds:?}").contains("hunter2"));
        assert!(!format!("{:?}", record()).contains("a.b.c"));
    }
}
