//! Revocation store trait defining the token blacklist contract.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::DomainError;

/// Store trait for blacklisted token ids
///
/// Keyed by `jti`. An entry lives exactly as long as the token it blocks
/// could still be presented, so memory stays bounded by outstanding
/// revocations rather than tokens ever issued. The in-memory map is the
/// reference implementation; the contract must hold identically over any
/// persistent keyed store (e.g. a cache with per-key TTL).
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record a revocation iff the id is not already actively revoked
    ///
    /// This is the linearizable primitive refresh rotation races on: of two
    /// concurrent calls with the same id, exactly one returns `true`.
    ///
    /// # Arguments
    /// * `token_id` - The token's `jti`
    /// * `expires_at` - The token's own expiry; the entry dies with it
    ///
    /// # Returns
    /// * `Ok(true)` - This call created the entry
    /// * `Ok(false)` - The id was already actively revoked
    /// * `Err(DomainError)` - Store failure
    ///
    /// # Example
    /// ```no_run
    /// # use ag_core::repositories::RevocationStore;
    /// # use chrono::{Duration, Utc};
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// let expires_at = Utc::now() + Duration::days(7);
    ///
    /// if store.try_revoke("0d9f4a32-jti", expires_at).await? {
    ///     println!("rotation may proceed");
    /// } else {
    ///     println!("token was already consumed");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn try_revoke(
        &self,
        token_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, DomainError>;

    /// Check whether an id is actively revoked
    ///
    /// Entries past their expiry never count as revoked; the token they
    /// blocked can no longer verify anyway.
    ///
    /// # Returns
    /// * `Ok(true)` - An active (non-expired) entry exists for the id
    /// * `Ok(false)` - No entry, or only a dead one
    /// * `Err(DomainError)` - Store failure
    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError>;

    /// Remove entries whose tokens expired before `now`
    ///
    /// Safe to call concurrently with reads and writes. Must never remove an
    /// entry whose token could still be presented as valid: the purge
    /// threshold is the token's own expiry, never earlier.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    /// * `Err(DomainError)` - Store failure
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Number of active (non-expired) entries
    async fn active_count(&self) -> Result<usize, DomainError>;

    /// Revoke an id, treating an already-revoked id as success
    ///
    /// # Example
    /// ```no_run
    /// # use ag_core::repositories::RevocationStore;
    /// # use chrono::{Duration, Utc};
    /// # async fn example(store: &impl RevocationStore) -> Result<(), Box<dyn std::error::Error>> {
    /// // logging out twice is fine
    /// let expires_at = Utc::now() + Duration::minutes(15);
    /// store.revoke("0d9f4a32-jti", expires_at).await?;
    /// store.revoke("0d9f4a32-jti", expires_at).await?;
    /// # Ok(())
    /// # }
    /// ```
    async fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> Result<(), DomainError> {
        self.try_revoke(token_id, expires_at).await.map(|_| ())
    }
}
