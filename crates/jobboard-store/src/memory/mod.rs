//! In-memory secure store backend.

pub mod store;

pub use store::MemorySecureStore;
