//! Authentication state transitions.

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// A change in the device's authentication state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AuthEvent {
    /// Login or registration succeeded and a session was stored.
    LoggedIn {
        /// User id from the token claims (may be empty).
        user_id: String,
        /// Role from the token claims, if it is a known role.
        role: Option<Role>,
    },
    /// The stored session was cleared.
    LoggedOut,
}

impl AuthEvent {
    /// Whether the user is authenticated after this transition.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::LoggedIn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authenticated() {
        let login = AuthEvent::LoggedIn {
            user_id: "7".to_string(),
            role: Some(Role::Applicant),
        };
        assert!(login.is_authenticated());
        assert!(!AuthEvent::LoggedOut.is_authenticated());
    }

    #[test]
    fn test_serde_tagged() {
        let json = serde_json::to_value(AuthEvent::LoggedOut).unwrap();
        assert_eq!(json["type"], "LoggedOut");
    }
}
