//! In-memory credential store for development and tests.

use async_trait::async_trait;
use constant_time_eq::constant_time_eq;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::r#trait::CredentialStore;

/// In-memory credential store
///
/// Holds plaintext subject/password pairs, so it is strictly for wiring up
/// development environments and tests; a real deployment backs the trait
/// with its account system. Unknown subjects and wrong passwords are
/// indistinguishable to the caller.
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, String>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Register or replace an account
    pub async fn add_account(&self, subject: impl Into<String>, password: impl Into<String>) {
        let mut accounts = self.accounts.write().await;
        accounts.insert(subject.into(), password.into());
    }
}

impl Default for InMemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn verify_password(
        &self,
        subject: &str,
        password: &str,
    ) -> Result<String, DomainError> {
        let accounts = self.accounts.read().await;

        let matches = match accounts.get(subject) {
            Some(stored) => constant_time_eq(stored.as_bytes(), password.as_bytes()),
            None => {
                // keep unknown subjects on the same comparison path
                let _ = constant_time_eq(b"missing-subject", password.as_bytes());
                false
            }
        };

        if matches {
            Ok(subject.to_string())
        } else {
            Err(DomainError::AuthFailed)
        }
    }
}
