//! Session lifecycle: login, registration, logout, and the persisted record.

pub mod events;
pub mod manager;
pub mod store;

pub use events::{AuthEventBus, SubscriptionId};
pub use manager::{LOGIN_PATH, LoginResult, REGISTER_PATH, RegisterResult, SessionManager};
pub use store::SessionStore;
