//! Background maintenance for revocation and rate limit state
//!
//! Both in-memory stores shed dead entries lazily at best; this service
//! sweeps them on an interval so memory stays bounded by live state rather
//! than by everything ever seen.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clock::Clock;
use crate::errors::DomainError;
use crate::repositories::RevocationStore;
use crate::services::rate_limit::FixedWindowLimiter;

/// Configuration for the maintenance sweep
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run a sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether the background task runs at all
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600,
            enabled: true,
        }
    }
}

/// Periodic sweeper over the revocation store and the rate limiter
pub struct CleanupService<R: RevocationStore + 'static> {
    revocations: Arc<R>,
    limiter: Arc<FixedWindowLimiter>,
    clock: Arc<dyn Clock>,
    config: CleanupConfig,
}

impl<R: RevocationStore> CleanupService<R> {
    /// Creates a cleanup service over both stores
    pub fn new(
        revocations: Arc<R>,
        limiter: Arc<FixedWindowLimiter>,
        clock: Arc<dyn Clock>,
        config: CleanupConfig,
    ) -> Self {
        Self {
            revocations,
            limiter,
            clock,
            config,
        }
    }

    /// Runs a single sweep
    ///
    /// Purges revocation entries for tokens past their natural expiry and
    /// rate windows that have fully elapsed. A failing store does not abort
    /// the sweep; the error is recorded and the other store still gets
    /// swept.
    ///
    /// # Returns
    ///
    /// * `Ok(CleanupResult)` - Counts of what was removed, plus any errors
    pub async fn run_cleanup(&self) -> Result<CleanupResult, DomainError> {
        if !self.config.enabled {
            return Ok(CleanupResult::default());
        }

        let mut result = CleanupResult::default();
        let now = self.clock.now();

        match self.revocations.purge_expired(now).await {
            Ok(count) => {
                result.revocations_purged = count;
            }
            Err(e) => {
                error!("failed to purge revocation entries: {}", e);
                result.errors.push(format!("revocation purge error: {e}"));
            }
        }

        result.rate_windows_purged = self.limiter.purge_stale().await;

        info!(
            revocations = result.revocations_purged,
            rate_windows = result.rate_windows_purged,
            "cleanup sweep completed"
        );

        Ok(result)
    }

    /// Starts the sweep as a background task
    ///
    /// Spawns a tokio task that runs [`Self::run_cleanup`] at the configured
    /// interval for the life of the process.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                interval_seconds = self.config.interval_seconds,
                "cleanup service started"
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                match self.run_cleanup().await {
                    Ok(result) => {
                        if !result.is_success() {
                            warn!("cleanup completed with errors: {:?}", result.errors);
                        }
                    }
                    Err(e) => {
                        error!("cleanup sweep failed: {}", e);
                    }
                }
            }
        });
    }
}

/// Result of one cleanup sweep
#[derive(Debug, Default)]
pub struct CleanupResult {
    /// Revocation entries removed because their token had expired anyway
    pub revocations_purged: usize,
    /// Rate windows removed because they had fully elapsed
    pub rate_windows_purged: usize,
    /// Errors encountered during the sweep
    pub errors: Vec<String>,
}

impl CleanupResult {
    /// True when the sweep saw no errors
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of entries removed across both stores
    pub fn total_cleaned(&self) -> usize {
        self.revocations_purged + self.rate_windows_purged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::repositories::InMemoryRevocationStore;
    use ag_shared::config::rate_limit::RateLimitConfig;
    use chrono::{Duration, TimeZone, Utc};

    fn fixture() -> (Arc<ManualClock>, CleanupService<InMemoryRevocationStore>) {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
        ));
        let revocations = Arc::new(InMemoryRevocationStore::new(clock.clone()));
        let limiter = Arc::new(FixedWindowLimiter::new(
            RateLimitConfig::default(),
            clock.clone(),
        ));
        let service = CleanupService::new(
            revocations,
            limiter,
            clock.clone(),
            CleanupConfig::default(),
        );
        (clock, service)
    }

    #[tokio::test]
    async fn sweep_purges_both_stores() {
        let (clock, service) = fixture();
        let now = clock.now();

        service
            .revocations
            .revoke("jti-1", now + Duration::seconds(60))
            .await
            .unwrap();
        service.limiter.admit("10.0.0.1", "login").await;

        // neither entry is stale yet
        let result = service.run_cleanup().await.unwrap();
        assert_eq!(result.total_cleaned(), 0);

        clock.advance(Duration::seconds(61));
        let result = service.run_cleanup().await.unwrap();
        assert_eq!(result.revocations_purged, 1);
        assert_eq!(result.rate_windows_purged, 1);
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn disabled_sweep_touches_nothing() {
        let (clock, _) = fixture();
        let revocations = Arc::new(InMemoryRevocationStore::new(clock.clone()));
        let limiter = Arc::new(FixedWindowLimiter::new(
            RateLimitConfig::default(),
            clock.clone(),
        ));
        let service = CleanupService::new(
            revocations.clone(),
            limiter,
            clock.clone(),
            CleanupConfig {
                enabled: false,
                ..CleanupConfig::default()
            },
        );

        revocations
            .revoke("jti-1", clock.now() + Duration::seconds(1))
            .await
            .unwrap();
        clock.advance(Duration::seconds(120));

        let result = service.run_cleanup().await.unwrap();
        assert_eq!(result.total_cleaned(), 0);

        // the dead entry is still there for a real purge to find
        assert_eq!(revocations.purge_expired(clock.now()).await.unwrap(), 1);
    }
}
