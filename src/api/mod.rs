//! API client facade and supporting types.
//!
//! The facade wraps the low-level transport with the cross-cutting behavior
//! every request shares: bearer-token injection, refreshed-token capture,
//! delayed loading-indicator control, and the logout broadcast on
//! authentication failure.

mod auth;
pub mod client;
pub mod errors;

pub use client::{ApiClient, ApiResponse};
pub use errors::{ApiError, ApiErrorCategory};
