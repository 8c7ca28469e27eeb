//! File-backed secure store backend.

pub mod store;

pub use store::FileSecureStore;
