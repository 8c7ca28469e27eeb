//! # jobboard-core
//!
//! Core crate for the job-board client. Contains the secure-store trait,
//! configuration schemas, session domain types, authentication events,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other jobboard crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
