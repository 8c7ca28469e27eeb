//! Login, registration, logout, and identity commands.

use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use jobboard_auth::{Landing, SessionManager};
use jobboard_core::error::AppError;
use jobboard_core::types::Role;

use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
    /// Account password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email (prompted when omitted)
    #[arg(long)]
    pub email: Option<String>,
    /// Account password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
    /// Account role
    #[arg(long, value_enum)]
    pub role: RoleArg,
}

/// Role accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RoleArg {
    /// Job seeker
    Applicant,
    /// Vacancy publisher
    Employer,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Applicant => Role::Applicant,
            RoleArg::Employer => Role::Employer,
        }
    }
}

/// Identity display row
#[derive(Debug, Serialize, Tabled)]
struct IdentityRow {
    /// User ID
    user_id: String,
    /// Role
    role: String,
    /// Authenticated
    authenticated: String,
    /// Landing
    landing: String,
}

impl IdentityRow {
    fn new(user_id: String, role: String, authenticated: bool, landing: Landing) -> Self {
        let or_dash = |s: String| if s.is_empty() { "-".to_string() } else { s };
        Self {
            user_id: or_dash(user_id),
            role: or_dash(role),
            authenticated: if authenticated { "✓" } else { "✗" }.to_string(),
            landing: landing.route().to_string(),
        }
    }
}

fn input_error(e: dialoguer::Error) -> AppError {
    AppError::internal(format!("Input error: {e}"))
}

fn prompt_email(email: &Option<String>) -> Result<String, AppError> {
    match email {
        Some(email) => Ok(email.clone()),
        None => dialoguer::Input::<String>::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(input_error),
    }
}

fn prompt_password(password: &Option<String>, confirm: bool) -> Result<String, AppError> {
    if let Some(password) = password {
        return Ok(password.clone());
    }
    let mut prompt = dialoguer::Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    prompt.interact().map_err(input_error)
}

/// `login`
pub async fn login(
    manager: &SessionManager,
    args: &LoginArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let email = prompt_email(&args.email)?;
    let password = prompt_password(&args.password, false)?;

    let result = manager.login(&email, &password).await;
    if !result.success {
        return Err(AppError::authentication("Login failed"));
    }

    if format == OutputFormat::Table {
        output::print_success(&format!("Logged in as {}", result.email));
    }
    let landing = Landing::for_role(result.role);
    let role = result.role.map(|r| r.to_string()).unwrap_or_default();
    output::print_list(&[IdentityRow::new(result.user_id, role, true, landing)], format);
    Ok(())
}

/// `register`
pub async fn register(
    manager: &SessionManager,
    args: &RegisterArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let email = prompt_email(&args.email)?;
    let password = prompt_password(&args.password, true)?;

    let result = manager.register(&email, &password, args.role.into()).await;
    if !result.success {
        return Err(AppError::authentication("Registration failed"));
    }

    if format == OutputFormat::Table {
        output::print_success(&format!("Registered {email}"));
    }
    whoami(manager, format).await
}

/// `logout`
pub async fn logout(manager: &SessionManager) -> Result<(), AppError> {
    manager.logout().await;
    output::print_success("Logged out");
    Ok(())
}

/// `whoami`
pub async fn whoami(manager: &SessionManager, format: OutputFormat) -> Result<(), AppError> {
    let data = manager.user_data().await;
    if !data.is_authenticated && format == OutputFormat::Table {
        output::print_warning("Not logged in");
        return Ok(());
    }

    let landing = manager.landing().await;
    let row = IdentityRow::new(data.user_id, data.role, data.is_authenticated, landing);
    output::print_list(&[row], format);
    Ok(())
}
