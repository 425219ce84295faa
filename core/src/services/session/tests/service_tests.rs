//! Unit tests for the session service

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};

use crate::clock::ManualClock;
use crate::errors::{ConfigError, DomainError};
use crate::repositories::{InMemoryCredentialStore, InMemoryRevocationStore};
use crate::services::session::{SessionConfig, SessionService};
use crate::services::token::{TokenCodec, TokenCodecConfig};

const TEST_SECRET: &str = "session-test-secret-0123456789-abcdefghij";

struct Fixture {
    clock: Arc<ManualClock>,
    service: SessionService<InMemoryRevocationStore, InMemoryCredentialStore>,
}

async fn fixture() -> Fixture {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
    ));
    let codec = Arc::new(
        TokenCodec::new(TokenCodecConfig::new(TEST_SECRET), clock.clone()).unwrap(),
    );
    let revocations = Arc::new(InMemoryRevocationStore::new(clock.clone()));
    let credentials = Arc::new(InMemoryCredentialStore::new());
    credentials.add_account("alice", "correct horse battery staple").await;

    let service = SessionService::new(
        revocations,
        credentials,
        codec,
        SessionConfig::default(),
    )
    .unwrap();

    Fixture { clock, service }
}

#[tokio::test]
async fn login_issues_a_working_pair() {
    let fx = fixture().await;

    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    assert_eq!(pair.access_expires_in, 15 * 60);
    assert_eq!(pair.refresh_expires_in, 7 * 24 * 60 * 60);

    let subject = fx.service.authenticate(&pair.access_token).await.unwrap();
    assert_eq!(subject, "alice");
}

#[tokio::test]
async fn login_rejects_wrong_password() {
    let fx = fixture().await;

    let result = fx.service.login("alice", "wrong").await;
    assert!(matches!(result.unwrap_err(), DomainError::AuthFailed));
}

#[tokio::test]
async fn login_rejects_unknown_subject() {
    let fx = fixture().await;

    let result = fx.service.login("mallory", "anything").await;
    assert!(matches!(result.unwrap_err(), DomainError::AuthFailed));
}

#[tokio::test]
async fn refresh_rotates_and_consumes_the_old_token() {
    let fx = fixture().await;
    let first = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    let second = fx.service.refresh(&first.refresh_token).await.unwrap();
    assert_ne!(second.refresh_token, first.refresh_token);
    assert_ne!(second.access_token, first.access_token);

    // the consumed token can never be used again
    let replay = fx.service.refresh(&first.refresh_token).await;
    assert!(matches!(replay.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn refresh_rejects_an_access_token() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    let result = fx.service.refresh(&pair.access_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn refresh_rejects_garbage() {
    let fx = fixture().await;

    let result = fx.service.refresh("not-a-token").await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn refresh_rejects_an_expired_token() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    fx.clock.advance(Duration::days(7) + Duration::seconds(1));

    let result = fx.service.refresh(&pair.refresh_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_refresh_has_exactly_one_winner() {
    let fx = Arc::new(fixture().await);
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();
    let refresh_token = Arc::new(pair.refresh_token);

    let mut handles = Vec::new();
    for _ in 0..16 {
        let fx = fx.clone();
        let token = refresh_token.clone();
        handles.push(tokio::spawn(async move {
            fx.service.refresh(&token).await.is_ok()
        }));
    }

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn logout_kills_the_access_token_before_its_expiry() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    assert!(fx.service.authenticate(&pair.access_token).await.is_ok());

    fx.service.logout(&pair.access_token).await.unwrap();

    // natural expiry is still 15 minutes away
    let result = fx.service.authenticate(&pair.access_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn logout_twice_is_idempotent() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    fx.service.logout(&pair.access_token).await.unwrap();
    assert!(fx.service.logout(&pair.access_token).await.is_ok());
}

#[tokio::test]
async fn logout_does_not_cascade_to_the_refresh_token() {
    let fx = fixture().await;

    // login -> (A1, R1); refresh(R1) -> (A2, R2); logout(A2)
    let first = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();
    let second = fx.service.refresh(&first.refresh_token).await.unwrap();
    fx.service.logout(&second.access_token).await.unwrap();

    // A1 was never revoked and is still inside its lifetime
    assert!(fx.service.authenticate(&first.access_token).await.is_ok());

    // R2 still rotates; logout touched only the presented access token
    assert!(fx.service.refresh(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn revoke_refresh_is_the_explicit_cascade() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    fx.service.revoke_refresh(&pair.refresh_token).await.unwrap();

    let result = fx.service.refresh(&pair.refresh_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn authenticate_rejects_an_expired_access_token() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    fx.clock.advance(Duration::minutes(15) + Duration::seconds(1));

    let result = fx.service.authenticate(&pair.access_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn authenticate_rejects_a_refresh_token_as_bearer() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    let result = fx.service.authenticate(&pair.refresh_token).await;
    assert!(matches!(result.unwrap_err(), DomainError::Unauthorized));
}

#[tokio::test]
async fn every_failure_mode_looks_the_same_to_the_caller() {
    let fx = fixture().await;
    let pair = fx
        .service
        .login("alice", "correct horse battery staple")
        .await
        .unwrap();

    // tampered
    let mut tampered = pair.access_token.clone();
    tampered.push('x');
    let forged = fx.service.authenticate(&tampered).await.unwrap_err();

    // revoked
    fx.service.logout(&pair.access_token).await.unwrap();
    let revoked = fx.service.authenticate(&pair.access_token).await.unwrap_err();

    // expired
    let fresh = fx.service.refresh(&pair.refresh_token).await.unwrap();
    fx.clock.advance(Duration::minutes(16));
    let expired = fx.service.authenticate(&fresh.access_token).await.unwrap_err();

    for err in [forged, revoked, expired] {
        assert!(matches!(err, DomainError::Unauthorized));
    }
}

#[tokio::test]
async fn construction_rejects_a_zero_ttl() {
    let fx = fixture().await;
    let codec = Arc::new(
        TokenCodec::new(TokenCodecConfig::new(TEST_SECRET), fx.clock.clone()).unwrap(),
    );

    let result = SessionService::new(
        Arc::new(InMemoryRevocationStore::new(fx.clock.clone())),
        Arc::new(InMemoryCredentialStore::new()),
        codec,
        SessionConfig::new(Duration::zero(), Duration::days(7)),
    );

    assert!(matches!(
        result,
        Err(ConfigError::InvalidTtl {
            field: "access_ttl"
        })
    ));
}
