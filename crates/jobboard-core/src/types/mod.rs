//! Session domain types shared by every crate.

pub mod role;
pub mod session;

pub use role::Role;
pub use session::{Credentials, SessionRecord, UserAuthData};
