//! Application configuration schemas.
//!
//! All configuration structs are deserialized from an optional TOML file
//! merged with `JOBBOARD__`-prefixed environment variables via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section has serde defaults so an empty source
//! yields a usable configuration.

pub mod api;
pub mod auth;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::api::ApiConfig;
pub use self::auth::AuthConfig;
pub use self::logging::LoggingConfig;
pub use self::store::StoreConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Token decoding settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Secure store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional. Environment variables prefixed with
    /// `JOBBOARD__` override file values, using `__` as the section
    /// separator (e.g. `JOBBOARD__API__BASE_URL`).
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("JOBBOARD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.api.base_url.trim().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.api.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }
        if !matches!(self.store.provider.as_str(), "memory" | "file") {
            return Err(AppError::configuration(format!(
                "Unknown store provider: '{}'. Supported: memory, file",
                self.store.provider
            )));
        }
        if self.auth.verify_signature && self.auth.jwt_secret.as_deref().unwrap_or("").is_empty() {
            return Err(AppError::configuration(
                "auth.verify_signature requires auth.jwt_secret",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.store.provider, "file");
        assert!(!config.auth.verify_signature);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[api]\nbase_url = \"http://10.0.2.2:8000/api\"\ntimeout_seconds = 5\n\n[store]\nprovider = \"memory\""
        )
        .unwrap();

        let config = AppConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.api.base_url, "http://10.0.2.2:8000/api");
        assert_eq!(config.api.timeout_seconds, 5);
        assert_eq!(config.store.provider, "memory");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_validate_rejects_unknown_provider() {
        let mut config = AppConfig::default();
        config.store.provider = "keychain".to_string();
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_validate_requires_secret_for_verification() {
        let mut config = AppConfig::default();
        config.auth.verify_signature = true;
        assert!(config.validate().is_err());

        config.auth.jwt_secret = Some("s3cret".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = AppConfig::default();
        config.api.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
