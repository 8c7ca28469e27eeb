//! Remote API configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings for the HTTP client that talks to the job-board service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base address every relative path is joined to.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Deadline for a single request, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl ApiConfig {
    /// The request deadline as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}
