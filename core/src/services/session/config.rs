//! Session service configuration

use chrono::Duration;

use ag_shared::config::auth::JwtConfig;

use crate::errors::ConfigError;

/// Token lifetimes used by the session service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Access token lifetime (short, minutes)
    pub access_ttl: Duration,

    /// Refresh token lifetime (long, days)
    pub refresh_ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
        }
    }
}

impl SessionConfig {
    /// Creates a configuration with explicit lifetimes
    pub fn new(access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            access_ttl,
            refresh_ttl,
        }
    }

    /// Rejects non-positive lifetimes before any token is minted
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidTtl {
                field: "access_ttl",
            });
        }
        if self.refresh_ttl <= Duration::zero() {
            return Err(ConfigError::InvalidTtl {
                field: "refresh_ttl",
            });
        }
        Ok(())
    }
}

impl From<&JwtConfig> for SessionConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            access_ttl: jwt.access_ttl(),
            refresh_ttl: jwt.refresh_ttl(),
        }
    }
}
