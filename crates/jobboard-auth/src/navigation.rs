//! Post-authentication landing decision.

use serde::Serialize;

use jobboard_core::types::Role;

/// The surface a user is sent to after the session state is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    /// Applicant profile and vacancy search.
    ApplicantHome,
    /// Employer dashboard with posted vacancies.
    EmployerHome,
    /// No usable session; ask for credentials.
    Login,
}

impl Landing {
    /// The one place role dispatch happens. An unknown or missing role is
    /// treated as no session.
    pub fn for_role(role: Option<Role>) -> Self {
        match role {
            Some(Role::Applicant) => Self::ApplicantHome,
            Some(Role::Employer) => Self::EmployerHome,
            None => Self::Login,
        }
    }

    /// Route name understood by the navigation layer.
    pub fn route(&self) -> &'static str {
        match self {
            Self::ApplicantHome => "/applicant/profile",
            Self::EmployerHome => "/employer/dashboard",
            Self::Login => "/login",
        }
    }
}

impl std::fmt::Display for Landing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.route())
    }
}
