//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{ConfigError, TokenError, MIN_SECRET_LENGTH};

use ag_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Errors crossing the core's public boundary
///
/// There is intentionally no `From<TokenError>` bridge: collapsing granular
/// token failures into `Unauthorized` is the session service's explicit,
/// logged decision, so a stray `?` cannot leak which check failed.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Umbrella authentication failure
    #[error("unauthorized")]
    Unauthorized,

    /// Credential store rejected the login
    #[error("authentication failed")]
    AuthFailed,

    /// Too many requests for this client and route class
    #[error("rate limit exceeded, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Store or collaborator failure with no recovery path here
    #[error("internal error: {message}")]
    Internal { message: String },

    /// Bridge to startup configuration failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<DomainError> for ErrorResponse {
    fn from(error: DomainError) -> Self {
        error.to_error_response()
    }
}

impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            DomainError::Unauthorized => ErrorResponse::new(
                error_codes::UNAUTHORIZED,
                "Could not validate credentials",
            ),
            DomainError::AuthFailed => ErrorResponse::new(
                error_codes::AUTHENTICATION_FAILED,
                "Invalid username or password",
            ),
            DomainError::RateLimited { retry_after_secs } => ErrorResponse::new(
                error_codes::RATE_LIMIT_EXCEEDED,
                "Too many requests",
            )
            .add_detail("retry_after_secs", retry_after_secs),
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
            DomainError::Config(_) => {
                ErrorResponse::new(error_codes::CONFIGURATION_ERROR, "Service misconfigured")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_response_carries_no_detail() {
        let response = DomainError::Unauthorized.to_error_response();

        assert_eq!(response.error, error_codes::UNAUTHORIZED);
        assert!(response.details.is_none());
    }

    #[test]
    fn test_rate_limited_response_carries_retry_after() {
        let response = DomainError::RateLimited {
            retry_after_secs: 42,
        }
        .to_error_response();

        assert_eq!(response.error, error_codes::RATE_LIMIT_EXCEEDED);
        let details = response.details.expect("retry delay must be present");
        assert_eq!(details["retry_after_secs"], serde_json::json!(42));
    }

    #[test]
    fn test_config_error_bridges_transparently() {
        let err: DomainError = ConfigError::MissingSecret.into();
        assert_eq!(err.to_string(), "signing secret is not configured");
    }

    #[test]
    fn test_from_impl_matches_trait_conversion() {
        let response = ErrorResponse::from(DomainError::AuthFailed);
        assert_eq!(response.error, error_codes::AUTHENTICATION_FAILED);
    }
}
