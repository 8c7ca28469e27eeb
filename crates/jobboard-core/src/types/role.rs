//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Roles a job-board account can hold.
///
/// The role is carried in the session token's `role` claim. Any value
/// outside this set means there is no usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Looks for vacancies and events.
    Applicant,
    /// Publishes vacancies and events.
    Employer,
}

impl Role {
    /// Return the role as the lowercase wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applicant => "applicant",
            Self::Employer => "employer",
        }
    }

    /// Parse a stored or claimed role, treating unknown values as absent.
    pub fn parse_claim(value: &str) -> Option<Self> {
        value.parse().ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "applicant" => Ok(Self::Applicant),
            "employer" => Ok(Self::Employer),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: applicant, employer"
            ))),
        }
    }
}
