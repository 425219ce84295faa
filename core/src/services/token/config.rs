//! Configuration for the token codec

use ag_shared::config::JwtConfig;
use chrono::Duration;

/// Configuration for the token codec
#[derive(Debug, Clone)]
pub struct TokenCodecConfig {
    /// Symmetric signing secret (HS256); must be at least 32 bytes
    pub secret: String,

    /// Tolerated clock skew when checking `iat` against now
    pub clock_skew_tolerance: Duration,
}

impl Default for TokenCodecConfig {
    fn default() -> Self {
        Self {
            secret: String::from("development-codec-secret-not-for-production"),
            clock_skew_tolerance: Duration::seconds(30),
        }
    }
}

impl TokenCodecConfig {
    /// Create a configuration with the given secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }
}

impl From<&JwtConfig> for TokenCodecConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            secret: jwt.secret.clone(),
            clock_skew_tolerance: Duration::seconds(jwt.clock_skew_tolerance),
        }
    }
}
