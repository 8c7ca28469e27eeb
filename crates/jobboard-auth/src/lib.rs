//! # jobboard-auth
//!
//! Authentication lifecycle and identity derivation for the job-board client.
//!
//! ## Modules
//!
//! - `jwt`: Claim extraction from the session token (unverified or HS256-verified)
//! - `session`: Login, registration, logout, and the persisted session record
//! - `navigation`: Where a user lands after authenticating, by role
//!
//! Identity always comes from the signed token's claims, never from unsigned
//! fields of the login or registration response.

pub mod error;
pub mod jwt;
pub mod navigation;
pub mod session;

pub use error::TokenError;
pub use jwt::{ClaimsDecoder, TokenClaims, TokenIdentity, UnverifiedDecoder, VerifyingDecoder};
pub use navigation::Landing;
pub use session::{AuthEventBus, LoginResult, RegisterResult, SessionManager, SessionStore};
