//! Session lifecycle orchestration

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::token::{SessionPair, TokenKind};
use crate::errors::{ConfigError, DomainError, DomainResult, TokenError};
use crate::repositories::{CredentialStore, RevocationStore};
use crate::services::token::TokenCodec;

use super::config::SessionConfig;

/// Session service managing the login/refresh/logout lifecycle
///
/// Orchestrates the token codec, the revocation store, and the credential
/// store. Every public method that inspects a presented token reports
/// failure as the single umbrella [`DomainError::Unauthorized`], whatever
/// the underlying cause was. Callers cannot distinguish an expired token
/// from a forged or revoked one; the granular reason goes to the log only.
pub struct SessionService<R, C>
where
    R: RevocationStore,
    C: CredentialStore,
{
    /// Revocation store consulted and written on every lifecycle change
    revocations: Arc<R>,
    /// Credential store, used during login only
    credentials: Arc<C>,
    /// Stateless JWT codec
    codec: Arc<TokenCodec>,
    /// Token lifetimes
    config: SessionConfig,
}

impl<R, C> SessionService<R, C>
where
    R: RevocationStore,
    C: CredentialStore,
{
    /// Creates a session service
    ///
    /// # Arguments
    ///
    /// * `revocations` - Store tracking blacklisted token ids
    /// * `credentials` - Password verifier used at login
    /// * `codec` - JWT issue/verify engine
    /// * `config` - Access and refresh token lifetimes
    ///
    /// # Returns
    ///
    /// * `Ok(SessionService)` - Ready to serve the session lifecycle
    /// * `Err(ConfigError)` - A configured lifetime is not positive
    pub fn new(
        revocations: Arc<R>,
        credentials: Arc<C>,
        codec: Arc<TokenCodec>,
        config: SessionConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            revocations,
            credentials,
            codec,
            config,
        })
    }

    /// Authenticates credentials and opens a session
    ///
    /// # Arguments
    ///
    /// * `subject` - The login identifier presented by the client
    /// * `password` - The plaintext password to verify
    ///
    /// # Returns
    ///
    /// * `Ok(SessionPair)` - Fresh access and refresh tokens
    /// * `Err(DomainError::AuthFailed)` - Unknown subject or wrong password
    pub async fn login(&self, subject: &str, password: &str) -> DomainResult<SessionPair> {
        let subject_id = self.credentials.verify_password(subject, password).await?;
        debug!(subject = %subject_id, "session opened");
        self.issue_pair(&subject_id)
    }

    /// Rotates a refresh token into a brand-new session pair
    ///
    /// The presented token must verify, be of kind `refresh`, and not have
    /// been consumed before. Consumption happens atomically through the
    /// store's compare-and-set, so two concurrent calls with the same token
    /// cannot both succeed. A replay after rotation is a theft signal and is
    /// logged as a warning.
    ///
    /// # Returns
    ///
    /// * `Ok(SessionPair)` - New pair; the presented token is now dead
    /// * `Err(DomainError::Unauthorized)` - Any verification or reuse failure
    pub async fn refresh(&self, raw_refresh: &str) -> DomainResult<SessionPair> {
        let claims = self
            .codec
            .verify_kind(raw_refresh, TokenKind::Refresh)
            .map_err(|e| self.rejected("refresh", e))?;

        let consumed = self
            .revocations
            .try_revoke(&claims.jti, claims.expires_at())
            .await?;
        if !consumed {
            warn!(
                jti = %claims.jti,
                subject = %claims.sub,
                error = %TokenError::Revoked,
                "refresh token replayed after rotation"
            );
            return Err(DomainError::Unauthorized);
        }

        self.issue_pair(&claims.sub)
    }

    /// Revokes an access token ahead of its natural expiry
    ///
    /// Only the presented access token dies. The refresh token of the same
    /// session stays usable; a caller wanting the session fully gone calls
    /// [`Self::revoke_refresh`] as well.
    pub async fn logout(&self, raw_access: &str) -> DomainResult<()> {
        let claims = self
            .codec
            .verify_kind(raw_access, TokenKind::Access)
            .map_err(|e| self.rejected("logout", e))?;

        self.revocations
            .revoke(&claims.jti, claims.expires_at())
            .await?;
        debug!(subject = %claims.sub, "access token revoked");
        Ok(())
    }

    /// Revokes a refresh token without rotating it
    ///
    /// The explicit counterpart to [`Self::logout`] for callers that want
    /// the whole session invalidated rather than just the access half.
    pub async fn revoke_refresh(&self, raw_refresh: &str) -> DomainResult<()> {
        let claims = self
            .codec
            .verify_kind(raw_refresh, TokenKind::Refresh)
            .map_err(|e| self.rejected("revoke_refresh", e))?;

        self.revocations
            .revoke(&claims.jti, claims.expires_at())
            .await?;
        debug!(subject = %claims.sub, "refresh token revoked");
        Ok(())
    }

    /// Resolves an access token to its subject for request authentication
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The subject id the token was issued to
    /// * `Err(DomainError::Unauthorized)` - Verification failed or the
    ///   token id is blacklisted
    pub async fn authenticate(&self, raw_access: &str) -> DomainResult<String> {
        let claims = self
            .codec
            .verify_kind(raw_access, TokenKind::Access)
            .map_err(|e| self.rejected("authenticate", e))?;

        if self.revocations.is_revoked(&claims.jti).await? {
            warn!(
                jti = %claims.jti,
                subject = %claims.sub,
                error = %TokenError::Revoked,
                "revoked access token presented"
            );
            return Err(DomainError::Unauthorized);
        }

        Ok(claims.sub)
    }

    /// Issues a fresh access+refresh pair for a subject
    fn issue_pair(&self, subject_id: &str) -> DomainResult<SessionPair> {
        let access = self
            .codec
            .issue(subject_id, TokenKind::Access, self.config.access_ttl)
            .map_err(Self::generation_failure)?;
        let refresh = self
            .codec
            .issue(subject_id, TokenKind::Refresh, self.config.refresh_ttl)
            .map_err(Self::generation_failure)?;

        Ok(SessionPair::new(
            access,
            refresh,
            self.config.access_ttl,
            self.config.refresh_ttl,
        ))
    }

    /// Collapses a granular verification failure into the umbrella error
    fn rejected(&self, operation: &'static str, error: TokenError) -> DomainError {
        debug!(operation, %error, "token rejected");
        DomainError::Unauthorized
    }

    /// Issuance failures are server faults, not credential faults
    fn generation_failure(error: TokenError) -> DomainError {
        DomainError::Internal {
            message: format!("token generation failed: {error}"),
        }
    }
}
