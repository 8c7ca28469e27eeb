//! Session lifecycle manager: login, registration, logout.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use jobboard_api::ApiClient;
use jobboard_core::config::AppConfig;
use jobboard_core::error::AppError;
use jobboard_core::events::AuthEvent;
use jobboard_core::traits::SecureStore;
use jobboard_core::types::{Credentials, Role, SessionRecord, UserAuthData};
use jobboard_store::StoreManager;

use crate::jwt::{ClaimsDecoder, TokenClaims, UnverifiedDecoder, build_decoder};
use crate::navigation::Landing;

use super::events::AuthEventBus;
use super::store::SessionStore;

/// Login endpoint, relative to the API base.
pub const LOGIN_PATH: &str = "/auth/login";
/// Registration endpoint, relative to the API base.
pub const REGISTER_PATH: &str = "/auth/register";

/// Outcome of [`SessionManager::login`].
///
/// Failure carries no detail: wrong credentials and an unreachable server
/// look the same to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoginResult {
    /// Whether a session was established.
    pub success: bool,
    /// User id from the token claims.
    pub user_id: String,
    /// Role from the token claims.
    pub role: Option<Role>,
    /// Account email.
    pub email: String,
}

impl LoginResult {
    fn failed() -> Self {
        Self::default()
    }
}

/// Outcome of [`SessionManager::register`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegisterResult {
    /// Whether the account was created and a session established.
    pub success: bool,
    /// User id from the token claims.
    pub user_id: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    role: Role,
}

/// Body returned by both auth endpoints. Only the tokens are trusted.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AuthResponse {
    id: Option<serde_json::Value>,
    email: Option<String>,
    role: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Owns the authentication lifecycle for one device.
///
/// Identity (`user_id`, `role`) is always taken from the access token's
/// claims; the `id` and `role` fields of the auth response are ignored.
#[derive(Debug, Clone)]
pub struct SessionManager {
    /// Transport to the job-board API.
    api: ApiClient,
    /// Persisted session record.
    store: SessionStore,
    /// Reads identity claims from the access token.
    decoder: Arc<dyn ClaimsDecoder>,
    /// Authentication-changed notifications.
    events: AuthEventBus,
}

impl SessionManager {
    /// Creates a manager that reads claims without signature verification.
    pub fn new(api: ApiClient, store: Arc<dyn SecureStore>) -> Self {
        Self::with_decoder(api, store, Arc::new(UnverifiedDecoder::new()))
    }

    /// Creates a manager with an explicit claims decoder.
    pub fn with_decoder(
        api: ApiClient,
        store: Arc<dyn SecureStore>,
        decoder: Arc<dyn ClaimsDecoder>,
    ) -> Self {
        Self {
            api,
            store: SessionStore::new(store),
            decoder,
            events: AuthEventBus::new(),
        }
    }

    /// Wire the API client, secure store, and decoder from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api)?;
        let store = StoreManager::new(&config.store)?;
        Ok(Self::with_decoder(
            api,
            store.provider(),
            build_decoder(&config.auth),
        ))
    }

    /// The API client, for authenticated calls made on behalf of the user.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Subscribe here to react to login and logout.
    pub fn events(&self) -> &AuthEventBus {
        &self.events
    }

    /// Log in with email and password.
    ///
    /// Returns `success = false` on any transport failure, non-2xx status,
    /// missing access token, or rejected token. Nothing is persisted then.
    pub async fn login(&self, email: &str, password: &str) -> LoginResult {
        let body = LoginRequest { email, password };
        match self.authenticate(LOGIN_PATH, &body).await {
            Some((record, claims)) => {
                info!(user_id = %record.user_id, role = %record.role, "Login succeeded");
                LoginResult {
                    success: true,
                    role: record.role(),
                    email: claims.email.unwrap_or_else(|| email.to_string()),
                    user_id: record.user_id,
                }
            }
            None => LoginResult::failed(),
        }
    }

    /// Log in with a [`Credentials`] value.
    pub async fn login_with(&self, credentials: &Credentials) -> LoginResult {
        self.login(&credentials.email, &credentials.password).await
    }

    /// Create an account and establish a session exactly as login does.
    pub async fn register(&self, email: &str, password: &str, role: Role) -> RegisterResult {
        let body = RegisterRequest {
            email,
            password,
            role,
        };
        match self.authenticate(REGISTER_PATH, &body).await {
            Some((record, _)) => {
                info!(user_id = %record.user_id, role = %record.role, "Registration succeeded");
                RegisterResult {
                    success: true,
                    user_id: record.user_id,
                }
            }
            None => RegisterResult::default(),
        }
    }

    /// Post to an auth endpoint and persist the session it returns.
    async fn authenticate<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Option<(SessionRecord, TokenClaims)> {
        let raw = match self.api.post_raw(path, body, None).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = path, error = %e, "Auth request failed");
                return None;
            }
        };
        if !raw.is_success() {
            warn!(path = path, status = raw.status, "Auth request rejected");
            return None;
        }

        let response: AuthResponse = match raw.json() {
            Ok(response) => response,
            Err(e) => {
                warn!(path = path, error = %e, "Auth response unreadable");
                return None;
            }
        };
        let Some(access_token) = response.access_token.clone().filter(|t| !t.is_empty()) else {
            warn!(path = path, "Auth response carried no access token");
            return None;
        };

        let claims = match self.decoder.decode(&access_token) {
            Ok(claims) => claims,
            Err(e) if e.is_rejection() => {
                warn!(path = path, error = %e, "Access token rejected");
                return None;
            }
            Err(e) => {
                debug!(path = path, error = %e, "Access token claims unreadable");
                TokenClaims::default()
            }
        };
        note_untrusted_fields(&response, &claims);

        let identity = claims.identity();
        let record = SessionRecord {
            access_token,
            refresh_token: response.refresh_token.unwrap_or_default(),
            user_id: identity.user_id,
            role: identity.role,
        };

        if let Err(e) = self.store.save(&record).await {
            warn!(path = path, error = %e, "Failed to persist session, clearing");
            self.store.clear().await;
            return None;
        }

        self.events.publish(AuthEvent::LoggedIn {
            user_id: record.user_id.clone(),
            role: record.role(),
        });
        Some((record, claims))
    }

    /// Remove the stored session. Never fails; removal errors are logged.
    ///
    /// Fires [`AuthEvent::LoggedOut`] once per call, even when no session
    /// was stored.
    pub async fn logout(&self) {
        if !self.store.clear().await {
            warn!("Logout left some session fields behind");
        }
        info!("Logged out");
        self.events.publish(AuthEvent::LoggedOut);
    }

    /// Stored access token, or `""`.
    pub async fn access_token(&self) -> String {
        self.store.access_token().await
    }

    /// Stored user id, or `""`.
    pub async fn user_id(&self) -> String {
        self.store.user_id().await
    }

    /// Stored role string, or `""`.
    pub async fn user_role(&self) -> String {
        self.store.user_role().await
    }

    /// Stored role, if it names a known role.
    pub async fn role(&self) -> Option<Role> {
        Role::parse_claim(&self.user_role().await)
    }

    /// Whether a non-empty access token is stored. Expiry is not checked.
    pub async fn is_authenticated(&self) -> bool {
        self.store.is_authenticated().await
    }

    /// Everything about the current user in one read.
    pub async fn user_data(&self) -> UserAuthData {
        self.store.user_data().await
    }

    /// The complete stored record, if all four fields are present.
    pub async fn session(&self) -> Option<SessionRecord> {
        self.store.load().await
    }

    /// Where the user should land given the stored session.
    pub async fn landing(&self) -> Landing {
        if !self.is_authenticated().await {
            return Landing::Login;
        }
        Landing::for_role(self.role().await)
    }
}

fn note_untrusted_fields(response: &AuthResponse, claims: &TokenClaims) {
    let response_id = response.id.as_ref().map(|v| match v {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    });
    if response_id.is_some() && response_id != claims.user_id {
        debug!("Auth response id differs from token claims, using claims");
    }
    if response.role.is_some() && response.role != claims.role {
        debug!("Auth response role differs from token claims, using claims");
    }
    if response.email.is_some() && claims.email.is_some() && response.email != claims.email {
        debug!("Auth response email differs from token claims");
    }
}
