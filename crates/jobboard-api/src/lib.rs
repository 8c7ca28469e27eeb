//! # jobboard-api
//!
//! Uniform HTTP access to the job-board service.
//!
//! ## Modules
//!
//! - `client`: [`ApiClient`]: raw requests and typed JSON helpers
//! - `compat`: JSON helpers that turn non-2xx responses into `T::default()`
//! - `error`: [`ApiError`] and its [`ApiErrorKind`] tag
//! - `response`: [`RawResponse`] status/body pair
//! - `url`: base-address joining rules
//!
//! The client knows nothing about authentication semantics; callers pass
//! the bearer token they want attached.

pub mod client;
pub mod compat;
pub mod error;
pub mod response;
pub mod url;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind, ApiResult};
pub use reqwest::Method;
pub use response::RawResponse;
