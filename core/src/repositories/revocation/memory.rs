//! In-memory reference implementation of the revocation store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::clock::Clock;
use crate::domain::entities::token::RevocationEntry;
use crate::errors::DomainError;

use super::r#trait::RevocationStore;

/// In-memory revocation store
///
/// A `jti`-keyed map behind a `RwLock`. Entry liveness is judged against the
/// injected clock, so an expired entry never produces a false positive even
/// before a purge pass has run. All writes serialize through the write lock,
/// which is what makes `try_revoke` a real compare-and-set.
pub struct InMemoryRevocationStore {
    entries: RwLock<HashMap<String, RevocationEntry>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRevocationStore {
    /// Create an empty store judging entry liveness with the given clock
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn try_revoke(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        // A dead entry no longer guards anything; overwrite it.
        if let Some(existing) = entries.get(token_id) {
            if !existing.is_expired_at(now) {
                return Ok(false);
            }
        }

        entries.insert(
            token_id.to_string(),
            RevocationEntry::new(token_id, expires_at),
        );
        debug!(token_id, "token id revoked");
        Ok(true)
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        Ok(entries
            .get(token_id)
            .map(|entry| !entry.is_expired_at(now))
            .unwrap_or(false))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut entries = self.entries.write().await;
        let initial_count = entries.len();

        entries.retain(|_, entry| !entry.is_expired_at(now));

        let purged = initial_count - entries.len();
        if purged > 0 {
            debug!(purged, "purged expired revocation entries");
        }
        Ok(purged)
    }

    async fn active_count(&self) -> Result<usize, DomainError> {
        let now = self.clock.now();
        let entries = self.entries.read().await;
        Ok(entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count())
    }
}
