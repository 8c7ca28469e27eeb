//! Store manager that dispatches to the configured secure store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use jobboard_core::config::StoreConfig;
use jobboard_core::error::AppError;
use jobboard_core::result::AppResult;
use jobboard_core::traits::SecureStore;

/// Secure store manager that wraps the configured provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct StoreManager {
    /// The inner store provider.
    inner: Arc<dyn SecureStore>,
}

impl StoreManager {
    /// Create a new store manager from configuration.
    pub fn new(config: &StoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn SecureStore> = match config.provider.as_str() {
            #[cfg(feature = "file")]
            "file" => {
                info!(path = %config.path, "Initializing file secure store");
                Arc::new(crate::file::FileSecureStore::new(&config.path))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory secure store");
                Arc::new(crate::memory::MemorySecureStore::new())
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown store provider: '{other}'. Supported: memory, file"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a store manager from an existing provider (for testing or platform keychains).
    pub fn from_provider(provider: Arc<dyn SecureStore>) -> Self {
        Self { inner: provider }
    }

    /// Shared handle to the inner provider, for injection into other components.
    pub fn provider(&self) -> Arc<dyn SecureStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl SecureStore for StoreManager {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.inner.remove(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_provider() {
        let config = StoreConfig {
            provider: "memory".to_string(),
            path: String::new(),
        };
        let manager = StoreManager::new(&config).unwrap();
        manager.set("user_role", "employer").await.unwrap();
        assert_eq!(
            manager.get("user_role").await.unwrap().as_deref(),
            Some("employer")
        );
    }

    #[tokio::test]
    async fn test_file_provider() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            provider: "file".to_string(),
            path: dir.path().join("s.json").to_string_lossy().into_owned(),
        };
        let manager = StoreManager::new(&config).unwrap();
        manager.set("user_id", "1").await.unwrap();
        assert!(dir.path().join("s.json").exists());
    }

    #[test]
    fn test_unknown_provider() {
        let config = StoreConfig {
            provider: "keychain".to_string(),
            path: String::new(),
        };
        assert!(StoreManager::new(&config).is_err());
    }
}
