//! Secure store key names for the persisted session record.
//!
//! Centralising the names keeps the write path (login) and the clear path
//! (logout) in agreement about which keys make up a session.

/// Key holding the bearer access token.
pub const ACCESS_TOKEN: &str = "access_token";

/// Key holding the refresh token.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Key holding the user id taken from the token claims.
pub const USER_ID: &str = "user_id";

/// Key holding the role taken from the token claims.
pub const USER_ROLE: &str = "user_role";

/// Every key of the session record. The access token comes first so that
/// clearing in this order never leaves a token behind without its identity.
pub const SESSION_KEYS: [&str; 4] = [ACCESS_TOKEN, REFRESH_TOKEN, USER_ID, USER_ROLE];
