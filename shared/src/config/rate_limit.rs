//! Rate limiting configuration module

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request quota for one route class over a fixed window
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteQuota {
    /// Max requests admitted per window
    pub max_requests: u32,

    /// Window length in seconds
    pub window_seconds: u64,
}

impl RouteQuota {
    /// Quota of `max_requests` per one-minute window
    pub const fn per_minute(max_requests: u32) -> Self {
        Self {
            max_requests,
            window_seconds: 60,
        }
    }

    /// Window length as a duration
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.window_seconds as i64)
    }
}

/// Rate limiting configuration
///
/// Quotas are keyed by route class (e.g. `login`, `refresh`); anything not
/// listed falls back to the default quota.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Quota applied to route classes without an explicit entry
    #[serde(default = "default_quota")]
    pub default_quota: RouteQuota,

    /// Per-route-class quota overrides
    #[serde(default = "default_route_quotas")]
    pub route_quotas: HashMap<String, RouteQuota>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            default_quota: default_quota(),
            route_quotas: default_route_quotas(),
        }
    }
}

impl RateLimitConfig {
    /// Quota in force for a route class
    pub fn quota_for(&self, route_class: &str) -> &RouteQuota {
        self.route_quotas
            .get(route_class)
            .unwrap_or(&self.default_quota)
    }

    /// Add or override a route class quota
    pub fn with_route_quota(mut self, route_class: impl Into<String>, quota: RouteQuota) -> Self {
        self.route_quotas.insert(route_class.into(), quota);
        self
    }

    /// Create a development configuration (more lenient limits)
    pub fn development() -> Self {
        Self {
            enabled: true,
            default_quota: RouteQuota::per_minute(1000),
            route_quotas: HashMap::from([
                (String::from("login"), RouteQuota::per_minute(100)),
                (String::from("refresh"), RouteQuota::per_minute(100)),
                (String::from("logout"), RouteQuota::per_minute(100)),
            ]),
        }
    }

    /// Create a production configuration (stricter limits)
    pub fn production() -> Self {
        Self::default()
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("RATE_LIMIT_ENABLED")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or_else(|_| default_enabled());
        let default_per_minute = std::env::var("RATE_LIMIT_DEFAULT_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);
        let login_per_minute = std::env::var("RATE_LIMIT_LOGIN_PER_MINUTE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let mut route_quotas = default_route_quotas();
        route_quotas.insert(
            String::from("login"),
            RouteQuota::per_minute(login_per_minute),
        );

        Self {
            enabled,
            default_quota: RouteQuota::per_minute(default_per_minute),
            route_quotas,
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_quota() -> RouteQuota {
    RouteQuota::per_minute(100)
}

fn default_route_quotas() -> HashMap<String, RouteQuota> {
    HashMap::from([
        (String::from("login"), RouteQuota::per_minute(5)),
        (String::from("refresh"), RouteQuota::per_minute(10)),
        (String::from("logout"), RouteQuota::per_minute(20)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quotas() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.quota_for("login").max_requests, 5);
        assert_eq!(config.quota_for("refresh").max_requests, 10);
        assert_eq!(config.quota_for("logout").max_requests, 20);
        assert_eq!(config.quota_for("orders").max_requests, 100);
    }

    #[test]
    fn test_route_quota_override() {
        let config =
            RateLimitConfig::default().with_route_quota("export", RouteQuota::per_minute(2));
        assert_eq!(config.quota_for("export").max_requests, 2);
        // untouched classes keep their defaults
        assert_eq!(config.quota_for("login").max_requests, 5);
    }

    #[test]
    fn test_quota_window_helper() {
        let quota = RouteQuota {
            max_requests: 3,
            window_seconds: 90,
        };
        assert_eq!(quota.window(), chrono::Duration::seconds(90));
    }

    #[test]
    fn test_development_is_lenient() {
        let config = RateLimitConfig::development();
        assert!(config.quota_for("login").max_requests > RateLimitConfig::default().quota_for("login").max_requests);
    }
}
