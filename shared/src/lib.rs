//! Shared configuration and wire types for AuthGate
//!
//! This crate provides the pieces used on both sides of the core boundary:
//! - Configuration types (JWT signing, rate limit quotas) with env loading
//! - Error response shape and stable error codes for the transport layer

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{AppConfig, Environment, JwtConfig, RateLimitConfig, RouteQuota};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
