//! Shared fixtures: a mock job-board API and secure store doubles.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Deserialize;
use serde_json::{Value, json};

use jobboard_api::ApiClient;
use jobboard_auth::SessionManager;
use jobboard_auth::jwt::{ClaimsDecoder, UnverifiedDecoder};
use jobboard_core::AppResult;
use jobboard_core::error::AppError;
use jobboard_core::traits::SecureStore;
use jobboard_store::memory::MemorySecureStore;

/// Secret the mock server signs tokens with.
pub const SERVER_SECRET: &str = "mock-server-secret";

/// Email whose login returns a 2xx without an access token.
pub const NO_TOKEN_EMAIL: &str = "notoken@example.com";
/// Email whose login returns a token that is not a JWT.
pub const GARBAGE_TOKEN_EMAIL: &str = "garbage@example.com";
/// Email whose login returns an already expired token.
pub const EXPIRED_TOKEN_EMAIL: &str = "expired@example.com";

#[derive(Debug, Clone)]
struct Account {
    password: String,
    user_id: String,
    role: String,
}

#[derive(Clone, Default)]
struct MockState {
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    next_id: Arc<Mutex<u64>>,
}

/// Handle to a running mock API.
#[derive(Clone)]
pub struct MockApi {
    pub addr: SocketAddr,
    state: MockState,
}

impl MockApi {
    /// Start the mock on an ephemeral port.
    pub async fn start() -> Self {
        let state = MockState {
            next_id: Arc::new(Mutex::new(100)),
            ..MockState::default()
        };
        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/profile/me", get(profile))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    /// Base address the client should use.
    pub fn base_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Seed an account.
    pub fn add_account(&self, email: &str, password: &str, user_id: &str, role: &str) {
        self.state.accounts.lock().unwrap().insert(
            email.to_string(),
            Account {
                password: password.to_string(),
                user_id: user_id.to_string(),
                role: role.to_string(),
            },
        );
    }

    /// Client pointing at this mock.
    pub fn client(&self) -> ApiClient {
        ApiClient::with_timeout(&self.base_url(), Duration::from_secs(5)).unwrap()
    }

    /// Manager over an in-memory store with the default decoder.
    pub fn manager(&self) -> (SessionManager, Arc<MemorySecureStore>) {
        let store = Arc::new(MemorySecureStore::new());
        let manager = SessionManager::new(self.client(), store.clone());
        (manager, store)
    }

    /// Manager over `store` with `decoder`.
    pub fn manager_with(
        &self,
        store: Arc<dyn SecureStore>,
        decoder: Arc<dyn ClaimsDecoder>,
    ) -> SessionManager {
        SessionManager::with_decoder(self.client(), store, decoder)
    }
}

/// Mint an HS256 token the way the server does.
pub fn mint_token(user_id: &str, role: &str, email: &str, exp_offset_secs: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "user_id": user_id,
        "role": role,
        "email": email,
        "sub": email,
        "type": "access",
        "iat": now,
        "exp": now + exp_offset_secs,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SERVER_SECRET.as_bytes()),
    )
    .unwrap()
}

/// The response shape of both auth endpoints. `id` and `role` are
/// deliberately wrong so tests can tell them apart from the claims.
fn auth_body(email: &str, account: &Account, access_token: Option<String>) -> Value {
    let mut body = json!({
        "id": format!("response-{}", account.user_id),
        "email": email,
        "role": "admin",
        "refresh_token": format!("refresh-{}", account.user_id),
    });
    if let Some(token) = access_token {
        body["access_token"] = Value::String(token);
    }
    body
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
    role: String,
}

async fn login(State(state): State<MockState>, Json(body): Json<LoginBody>) -> Response {
    let account = state.accounts.lock().unwrap().get(&body.email).cloned();
    let Some(account) = account.filter(|a| a.password == body.password) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid credentials" })),
        )
            .into_response();
    };

    let token = match body.email.as_str() {
        NO_TOKEN_EMAIL => None,
        GARBAGE_TOKEN_EMAIL => Some("not-a-jwt".to_string()),
        EXPIRED_TOKEN_EMAIL => Some(mint_token(&account.user_id, &account.role, &body.email, -3600)),
        _ => Some(mint_token(&account.user_id, &account.role, &body.email, 3600)),
    };
    Json(auth_body(&body.email, &account, token)).into_response()
}

async fn register(State(state): State<MockState>, Json(body): Json<RegisterBody>) -> Response {
    if body.role != "applicant" && body.role != "employer" {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": "bad role" })))
            .into_response();
    }

    let account = {
        let mut accounts = state.accounts.lock().unwrap();
        if accounts.contains_key(&body.email) {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Email already registered" })),
            )
                .into_response();
        }
        let mut next_id = state.next_id.lock().unwrap();
        *next_id += 1;
        let account = Account {
            password: body.password.clone(),
            user_id: next_id.to_string(),
            role: body.role.clone(),
        };
        accounts.insert(body.email.clone(), account.clone());
        account
    };

    let token = mint_token(&account.user_id, &account.role, &body.email, 3600);
    (StatusCode::CREATED, Json(auth_body(&body.email, &account, Some(token)))).into_response()
}

async fn profile(headers: HeaderMap) -> Response {
    let token = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    let Some(token) = token else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    let identity = UnverifiedDecoder::new().identity(token);
    Json(json!({ "user_id": identity.user_id, "role": identity.role })).into_response()
}

/// Store double whose writes can be made to fail per key.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemorySecureStore,
    fail_set: Mutex<HashSet<String>>,
    fail_remove: Mutex<HashSet<String>>,
    removed: Mutex<Vec<String>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_set_on(&self, key: &str) {
        self.fail_set.lock().unwrap().insert(key.to_string());
    }

    pub fn fail_remove_on(&self, key: &str) {
        self.fail_remove.lock().unwrap().insert(key.to_string());
    }

    pub fn heal(&self) {
        self.fail_set.lock().unwrap().clear();
        self.fail_remove.lock().unwrap().clear();
    }

    /// Keys passed to `remove`, in call order, including failed ones.
    pub fn removal_attempts(&self) -> Vec<String> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl SecureStore for FlakyStore {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        if self.fail_set.lock().unwrap().contains(key) {
            return Err(AppError::storage(format!("injected set failure for {key}")));
        }
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.removed.lock().unwrap().push(key.to_string());
        if self.fail_remove.lock().unwrap().contains(key) {
            return Err(AppError::storage(format!("injected remove failure for {key}")));
        }
        self.inner.remove(key).await
    }
}

/// Decoder used when a test needs the strict, server-matching path.
pub fn verifying_decoder(secret: &str, reject_expired: bool) -> Arc<dyn ClaimsDecoder> {
    Arc::new(jobboard_auth::VerifyingDecoder::new(
        secret.as_bytes(),
        reject_expired,
    ))
}
