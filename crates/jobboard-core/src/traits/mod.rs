//! Core traits defined in `jobboard-core` and implemented by other crates.

pub mod secure_store;

pub use secure_store::SecureStore;
