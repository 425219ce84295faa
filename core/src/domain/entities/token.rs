//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of credential a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived credential authorizing API calls
    Access,
    /// Long-lived, single-use credential exchanged for a new pair
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the authenticated identity)
    pub sub: String,

    /// Token kind (access or refresh)
    pub kind: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token, revocation key)
    pub jti: String,
}

impl Claims {
    /// Creates new claims for a token of the given kind
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The authenticated subject's identifier
    /// * `kind` - Access or refresh
    /// * `now` - Issuance instant, supplied by the caller's clock
    /// * `ttl` - Lifetime; `exp` is set to `now + ttl`
    ///
    /// # Returns
    ///
    /// A new `Claims` instance with a fresh random `jti`
    pub fn new(subject_id: &str, kind: TokenKind, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject_id.to_string(),
            kind,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks if the claims have expired at the given instant
    ///
    /// Boundary-exact: a token is still live at `now == exp` and dead one
    /// second later.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Expiration as a `DateTime`
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }
}

/// Revocation record for a blacklisted token id
///
/// Lives only as long as the token it blocks could still be presented;
/// entries past `expires_at` are dead weight and get purged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevocationEntry {
    /// The revoked token's `jti`
    pub token_id: String,

    /// The revoked token's own expiry
    pub expires_at: DateTime<Utc>,
}

impl RevocationEntry {
    /// Creates a new revocation entry
    pub fn new(token_id: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token_id: token_id.into(),
            expires_at,
        }
    }

    /// Checks if the underlying token has expired at the given instant
    ///
    /// Mirrors `Claims::is_expired_at`: the entry stays in force through the
    /// token's final valid second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

/// Token pair returned to the client after login or refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token expiry time in seconds
    pub access_expires_in: i64,

    /// Refresh token expiry time in seconds
    pub refresh_expires_in: i64,
}

impl SessionPair {
    /// Creates a new session pair
    ///
    /// # Arguments
    ///
    /// * `access_token` - The JWT access token
    /// * `refresh_token` - The JWT refresh token
    /// * `access_ttl` - Configured access token lifetime
    /// * `refresh_ttl` - Configured refresh token lifetime
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
