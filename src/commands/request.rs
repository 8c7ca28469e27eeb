//! Generic API request command.

use clap::Args;
use serde_json::{Value, json};

use jobboard_api::Method;
use jobboard_auth::SessionManager;
use jobboard_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for `request`
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE, ...)
    pub method: String,
    /// Path relative to the API base, or an absolute URL
    pub path: String,
    /// JSON request body
    #[arg(short, long)]
    pub data: Option<String>,
    /// Do not attach the stored access token
    #[arg(long)]
    pub anonymous: bool,
}

fn parse_method(method: &str) -> Result<Method, AppError> {
    Method::from_bytes(method.trim().to_uppercase().as_bytes())
        .map_err(|_| AppError::validation(format!("Invalid HTTP method '{method}'")))
}

/// Execute `request`
pub async fn execute(
    manager: &SessionManager,
    args: &RequestArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let method = parse_method(&args.method)?;
    let body: Option<Value> = args
        .data
        .as_deref()
        .map(serde_json::from_str)
        .transpose()?;

    let token = if args.anonymous {
        None
    } else {
        Some(manager.access_token().await)
    };

    let raw = manager
        .api()
        .request(method, &args.path, body.as_ref(), token.as_deref())
        .await?;

    let parsed: Value = serde_json::from_str(&raw.body).unwrap_or(Value::String(raw.body.clone()));
    match format {
        OutputFormat::Json => output::print_json(&json!({ "status": raw.status, "body": parsed })),
        OutputFormat::Table => {
            output::print_kv("Status", &raw.status.to_string());
            match &parsed {
                Value::String(text) => println!("{text}"),
                other => output::print_json(other),
            }
        }
    }

    if raw.is_success() {
        Ok(())
    } else {
        Err(AppError::http(format!(
            "Request failed with status {}",
            raw.status
        )))
    }
}
