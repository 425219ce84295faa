//! Domain layer containing the business entities of the credential lifecycle.

pub mod entities;

// Re-export commonly used domain types
pub use entities::{Claims, RevocationEntry, SessionPair, TokenKind};
