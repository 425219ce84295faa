//! Session service module
//!
//! This module owns the authenticated session lifecycle:
//! - Login against the credential store, issuing an access+refresh pair
//! - Single-use refresh rotation with replay detection
//! - Logout and explicit refresh revocation
//! - Per-request authentication against the revocation store

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::SessionConfig;
pub use service::SessionService;
