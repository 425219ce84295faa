//! Granular error types for the credential lifecycle
//!
//! Token failures are deliberately fine-grained here for logging and tests.
//! None of them cross the system boundary as-is: the session service
//! collapses every verification failure into the umbrella
//! `DomainError::Unauthorized` so callers cannot probe which check failed.

use thiserror::Error;

/// Minimum signing secret length in bytes
pub const MIN_SECRET_LENGTH: usize = 32;

/// Startup configuration errors
///
/// Never recovered at runtime; a process with a bad signing secret must not
/// serve traffic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("signing secret is not configured")]
    MissingSecret,

    #[error("signing secret too weak: {length} bytes, need at least {minimum}")]
    WeakSecret { length: usize, minimum: usize },

    #[error("non-positive token lifetime: {field}")]
    InvalidTtl { field: &'static str },
}

/// Token verification and generation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Structurally invalid, undecodable, claims out of shape, or issued in
    /// the future beyond the skew tolerance
    #[error("malformed token")]
    Malformed,

    /// Signature does not authenticate the claimed fields
    #[error("token signature mismatch")]
    SignatureMismatch,

    /// Past its `exp`
    #[error("token expired")]
    Expired,

    /// Its `jti` is blacklisted
    #[error("token revoked")]
    Revoked,

    /// Signing or claim serialization failed
    #[error("token generation failed")]
    GenerationFailed,
}
