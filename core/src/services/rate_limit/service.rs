//! Fixed-window limiter implementation

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use ag_shared::config::rate_limit::RateLimitConfig;

use crate::clock::Clock;
use crate::errors::{DomainError, DomainResult};

/// Outcome of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateDecision {
    /// Admitted; `remaining` is the quota left in the current window
    Allowed { remaining: u32 },
    /// Denied; retry once `retry_after` has passed
    Denied { retry_after: Duration },
}

/// One client's counter for the window currently in force
#[derive(Debug, Clone)]
struct RateWindow {
    window_start: DateTime<Utc>,
    count: u32,
}

/// In-process fixed-window rate limiter
///
/// Counts requests per (client key, route class) against the quotas in
/// [`RateLimitConfig`]. Windows are fixed, not sliding: when a window has
/// fully elapsed the counter starts over, so a burst straddling the boundary
/// can see up to two quotas back to back. That weakness is accepted in
/// exchange for constant-time checks and O(active clients) memory.
pub struct FixedWindowLimiter {
    config: RateLimitConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<HashMap<(String, String), RateWindow>>,
}

impl FixedWindowLimiter {
    /// Creates a limiter with no tracked clients
    pub fn new(config: RateLimitConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Checks and counts one request
    ///
    /// A denied call does not increment the counter, so hammering a closed
    /// window never pushes the reset further out; the lockout always ends at
    /// the window boundary.
    ///
    /// # Arguments
    ///
    /// * `client_key` - Caller identity (an IP, an account id)
    /// * `route_class` - Quota bucket (`login`, `refresh`, ...); unknown
    ///   classes fall back to the default quota
    pub async fn admit(&self, client_key: &str, route_class: &str) -> RateDecision {
        let quota = self.config.quota_for(route_class);
        let max_requests = quota.max_requests;
        let window = quota.window();

        if !self.config.enabled {
            return RateDecision::Allowed {
                remaining: max_requests,
            };
        }

        let now = self.clock.now();
        let mut state = self.state.lock().unwrap();
        let entry = state
            .entry((client_key.to_owned(), route_class.to_owned()))
            .or_insert(RateWindow {
                window_start: now,
                count: 0,
            });

        // window elapsed, counter starts over
        if now - entry.window_start >= window {
            entry.window_start = now;
            entry.count = 0;
        }

        if entry.count >= max_requests {
            let retry_after = entry.window_start + window - now;
            warn!(
                client_key,
                route_class,
                retry_after_secs = retry_after.num_seconds(),
                "rate limit exceeded"
            );
            return RateDecision::Denied { retry_after };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: max_requests - entry.count,
        }
    }

    /// `Result` flavor of [`Self::admit`] for callers composing with `?`
    ///
    /// A sub-second remainder rounds up to a whole second, so a denied call
    /// never carries `retry_after_secs: 0`.
    pub async fn try_admit(&self, client_key: &str, route_class: &str) -> DomainResult<()> {
        match self.admit(client_key, route_class).await {
            RateDecision::Allowed { .. } => Ok(()),
            RateDecision::Denied { retry_after } => {
                let whole = retry_after.num_seconds().max(0);
                let retry_after_secs = if retry_after > Duration::seconds(whole) {
                    (whole + 1) as u64
                } else {
                    whole as u64
                };
                Err(DomainError::RateLimited { retry_after_secs })
            }
        }
    }

    /// Drops windows that have fully elapsed
    ///
    /// The next `admit` would reset them anyway; dropping them keeps the map
    /// bounded by currently active clients. A window still in force is never
    /// dropped, a lockout is never cut short.
    ///
    /// # Returns
    ///
    /// Number of windows removed
    pub async fn purge_stale(&self) -> usize {
        let now = self.clock.now();
        let mut state = self.state.lock().unwrap();
        let before = state.len();
        state.retain(|key, entry| {
            let window = self.config.quota_for(&key.1).window();
            now - entry.window_start < window
        });
        let purged = before - state.len();
        if purged > 0 {
            debug!(purged, "stale rate windows dropped");
        }
        purged
    }

    /// Number of (client, route class) windows currently tracked
    pub async fn tracked_windows(&self) -> usize {
        self.state.lock().unwrap().len()
    }
}
