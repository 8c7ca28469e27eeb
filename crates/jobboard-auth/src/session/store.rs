//! The four-field session record kept in the secure store.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use jobboard_core::error::AppError;
use jobboard_core::traits::SecureStore;
use jobboard_core::types::{SessionRecord, UserAuthData};
use jobboard_store::keys;

/// Reads and writes the session record one key at a time.
///
/// Reads never fail: a missing key or a store fault reads as `""`.
/// Writes (`save`, `clear`) are serialized against each other so two
/// concurrent logins cannot interleave their fields.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Backing key-value store.
    store: Arc<dyn SecureStore>,
    /// Held for the duration of a whole-record write.
    write_lock: Arc<Mutex<()>>,
}

impl SessionStore {
    /// Wrap a secure store.
    pub fn new(store: Arc<dyn SecureStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying secure store.
    pub fn inner(&self) -> Arc<dyn SecureStore> {
        Arc::clone(&self.store)
    }

    async fn read(&self, key: &str) -> String {
        match self.store.get(key).await {
            Ok(value) => value.unwrap_or_default(),
            Err(e) => {
                warn!(key = key, error = %e, "Secure store read failed");
                String::new()
            }
        }
    }

    /// Stored access token, or `""`.
    pub async fn access_token(&self) -> String {
        self.read(keys::ACCESS_TOKEN).await
    }

    /// Stored refresh token, or `""`.
    pub async fn refresh_token(&self) -> String {
        self.read(keys::REFRESH_TOKEN).await
    }

    /// Stored user id, or `""`.
    pub async fn user_id(&self) -> String {
        self.read(keys::USER_ID).await
    }

    /// Stored role string, or `""`.
    pub async fn user_role(&self) -> String {
        self.read(keys::USER_ROLE).await
    }

    /// Whether a non-empty access token is stored.
    pub async fn is_authenticated(&self) -> bool {
        !self.access_token().await.is_empty()
    }

    /// The full record, only if all four fields are present.
    pub async fn load(&self) -> Option<SessionRecord> {
        let record = SessionRecord {
            access_token: self.access_token().await,
            refresh_token: self.refresh_token().await,
            user_id: self.user_id().await,
            role: self.user_role().await,
        };
        record.is_complete().then_some(record)
    }

    /// Snapshot of the identity fields and token.
    pub async fn user_data(&self) -> UserAuthData {
        let token = self.access_token().await;
        UserAuthData {
            user_id: self.user_id().await,
            role: self.user_role().await,
            is_authenticated: !token.is_empty(),
            token,
        }
    }

    /// Persist `record` field by field.
    ///
    /// Empty fields are removed rather than stored so nothing from a
    /// previous session survives. The access token is written last: a
    /// failure part-way never leaves a token that makes the device look
    /// logged in with stale identity fields.
    pub async fn save(&self, record: &SessionRecord) -> Result<(), AppError> {
        let _guard = self.write_lock.lock().await;

        let fields = [
            (keys::REFRESH_TOKEN, record.refresh_token.as_str()),
            (keys::USER_ID, record.user_id.as_str()),
            (keys::USER_ROLE, record.role.as_str()),
            (keys::ACCESS_TOKEN, record.access_token.as_str()),
        ];

        for (key, value) in fields {
            if value.is_empty() {
                self.store.remove(key).await?;
            } else {
                self.store.set(key, value).await?;
            }
            debug!(key = key, empty = value.is_empty(), "Session field persisted");
        }
        Ok(())
    }

    /// Remove every session key, attempting all of them regardless of
    /// earlier failures. Returns `true` if every removal succeeded.
    ///
    /// If the access token cannot be removed it is overwritten with `""`,
    /// which still reads as logged out.
    pub async fn clear(&self) -> bool {
        let _guard = self.write_lock.lock().await;

        let mut all_removed = true;
        for key in keys::SESSION_KEYS {
            if let Err(e) = self.store.remove(key).await {
                all_removed = false;
                warn!(key = key, error = %e, "Failed to remove session field");

                if key == keys::ACCESS_TOKEN {
                    if let Err(e) = self.store.set(key, "").await {
                        warn!(error = %e, "Failed to blank access token");
                    }
                }
            }
        }
        all_removed
    }
}
