//! CLI command definitions and dispatch.

pub mod auth;
pub mod request;

use clap::{Parser, Subcommand};

use jobboard_auth::SessionManager;
use jobboard_core::config::AppConfig;
use jobboard_core::error::AppError;

use crate::output::OutputFormat;

/// Job-board client: session and API access
#[derive(Debug, Parser)]
#[command(name = "jobboard", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session
    Login(auth::LoginArgs),
    /// Create an account and store the session
    Register(auth::RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the stored identity
    Whoami,
    /// Send a request to the API, authenticated with the stored token
    Request(request::RequestArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        let manager = SessionManager::from_config(config)?;

        match &self.command {
            Commands::Login(args) => auth::login(&manager, args, self.format).await,
            Commands::Register(args) => auth::register(&manager, args, self.format).await,
            Commands::Logout => auth::logout(&manager).await,
            Commands::Whoami => auth::whoami(&manager, self.format).await,
            Commands::Request(args) => request::execute(&manager, args, self.format).await,
        }
    }
}
