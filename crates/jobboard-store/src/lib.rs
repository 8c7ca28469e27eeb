//! # jobboard-store
//!
//! Secure store implementations for the job-board client. Supports two modes:
//!
//! - **file**: JSON file readable only by the owning user, durable across restarts
//! - **memory**: In-process map using [dashmap](https://crates.io/crates/dashmap), for tests and ephemeral sessions
//!
//! The provider is selected at runtime based on configuration. Platform
//! keychains plug in by implementing [`jobboard_core::traits::SecureStore`].

#[cfg(feature = "file")]
pub mod file;
pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StoreManager;
