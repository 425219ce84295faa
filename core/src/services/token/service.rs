//! JWT codec implementation

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{ConfigError, TokenError, MIN_SECRET_LENGTH};

use super::config::TokenCodecConfig;

/// Stateless JWT issue/verify engine
///
/// Pure over its inputs and the injected clock: no revocation lookups, no
/// store access. Revocation is the session service's concern, layered on
/// top of `verify`.
pub struct TokenCodec {
    config: TokenCodecConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec, validating the signing secret
    ///
    /// # Arguments
    ///
    /// * `config` - Secret and skew tolerance
    /// * `clock` - Time source for issuance and every freshness check
    ///
    /// # Returns
    ///
    /// * `Ok(TokenCodec)` - Ready to issue and verify
    /// * `Err(ConfigError)` - Secret missing or shorter than 32 bytes;
    ///   fatal, the process must not serve traffic
    pub fn new(config: TokenCodecConfig, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        if config.secret.is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if config.secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::WeakSecret {
                length: config.secret.len(),
                minimum: MIN_SECRET_LENGTH,
            });
        }

        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        // expiry and skew are checked against the injected clock instead of
        // the library's wall-clock reads, keeping verification deterministic
        validation.validate_exp = false;
        validation.validate_aud = false;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
        })
    }

    /// Issues a signed token with a fresh `jti`
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The authenticated subject
    /// * `kind` - Access or refresh
    /// * `ttl` - Lifetime; `exp` is `now + ttl` on the injected clock
    pub fn issue(
        &self,
        subject_id: &str,
        kind: TokenKind,
        ttl: chrono::Duration,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject_id, kind, self.clock.now(), ttl);
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|_| TokenError::GenerationFailed)
    }

    /// Verifies structure, signature, issuance skew, and expiry
    ///
    /// Checks run in that order, so a tampered token fails with
    /// `SignatureMismatch` even if it also happens to be expired. Expiry is
    /// boundary-exact: a token is still valid at `now == exp`.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature authentic and token in its validity window
    /// * `Err(TokenError)` - `Malformed`, `SignatureMismatch`, or `Expired`
    pub fn verify(&self, raw: &str) -> Result<Claims, TokenError> {
        let token_data =
            decode::<Claims>(raw, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        TokenError::SignatureMismatch
                    }
                    _ => TokenError::Malformed,
                }
            })?;
        let claims = token_data.claims;

        let now = self.clock.now().timestamp();
        let skew = self.config.clock_skew_tolerance.num_seconds();
        if claims.iat > now + skew {
            warn!(jti = %claims.jti, iat = claims.iat, now, "token issued in the future");
            return Err(TokenError::Malformed);
        }
        if now > claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// Convenience check that a verified token is of the expected kind
    ///
    /// A kind mismatch (an access token where a refresh token belongs, or
    /// vice versa) is treated as a malformed presentation, not a distinct
    /// failure a caller could probe for.
    pub fn verify_kind(&self, raw: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let claims = self.verify(raw)?;
        if claims.kind != expected {
            debug!(jti = %claims.jti, kind = %claims.kind, expected = %expected, "token kind mismatch");
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }
}
