//! Secure key-value store trait for pluggable credential persistence.

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for secure credential storage backends.
///
/// Each call is atomic for a single key only; nothing is atomic across
/// keys. Implementations must be durable across process restarts where the
/// platform allows it and must keep values private to this application.
#[async_trait]
pub trait SecureStore: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;
}
