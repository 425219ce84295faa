//! # AuthGate Core
//!
//! Token-based authentication core for the AuthGate backend.
//! This crate contains the JWT codec, the session lifecycle services,
//! revocation and credential store interfaces, rate limiting, and the
//! error types that form the public surface of the authentication domain.

pub mod clock;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
