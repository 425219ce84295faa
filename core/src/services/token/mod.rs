//! Token codec module for JWT management
//!
//! This module handles stateless token operations:
//! - Access and refresh token issuance with unique `jti` identifiers
//! - Signature and lifetime verification against an injected clock
//!
//! Revocation state lives in `repositories::revocation`; the codec itself
//! never consults it.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenCodecConfig;
pub use service::TokenCodec;
