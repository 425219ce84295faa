//! Credential store trait, the boundary to the external account system.

use async_trait::async_trait;

use crate::errors::DomainError;

/// External collaborator validating login credentials
///
/// The core calls this during `login` only; refresh, logout, and
/// authenticate never touch credentials. Password storage and hashing
/// policy live entirely behind this boundary.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Validate a subject's password
    ///
    /// # Arguments
    /// * `subject` - The identifier presented at login (e.g. a username)
    /// * `password` - The plaintext password to check
    ///
    /// # Returns
    /// * `Ok(String)` - The canonical subject id to mint tokens for
    /// * `Err(DomainError::AuthFailed)` - Unknown subject or wrong password
    /// * `Err(DomainError)` - Store failure
    async fn verify_password(&self, subject: &str, password: &str)
        -> Result<String, DomainError>;
}
