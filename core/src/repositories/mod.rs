//! Repository interfaces for the authentication domain.

pub mod credential;
pub mod revocation;

pub use credential::{CredentialStore, InMemoryCredentialStore};
pub use revocation::{InMemoryRevocationStore, RevocationStore};
