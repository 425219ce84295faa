//! Rate limiting module
//!
//! Fixed-window request counting per client key and route class, used to
//! throttle credential-guessing and token-grinding traffic before it
//! reaches the session service.

mod service;

#[cfg(test)]
mod tests;

pub use service::{FixedWindowLimiter, RateDecision};
