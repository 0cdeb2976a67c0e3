//! Unit tests for the OTP service

use chrono::Duration;
use std::sync::Arc;

use crate::domain::value_objects::{DeliveryMethod, IssueOutcome, VerifyOutcome};
use crate::errors::DeliveryError;
use crate::services::otp::{
    InMemoryOtpStore, ManualClock, NotifierRegistry, OtpService, OtpServiceConfig, OtpStore,
};

use super::mocks::{t0, MockNotifier};

const EMAIL: &str = "a@b.com";
const PHONE: &str = "+14155552671";

struct Harness {
    service: OtpService<InMemoryOtpStore>,
    store: Arc<InMemoryOtpStore>,
    email: Arc<MockNotifier>,
    sms: Arc<MockNotifier>,
    clock: Arc<ManualClock>,
}

fn harness_with(config: OtpServiceConfig, email: MockNotifier, sms: MockNotifier) -> Harness {
    let store = Arc::new(InMemoryOtpStore::new());
    let email = Arc::new(email);
    let sms = Arc::new(sms);
    let clock = Arc::new(ManualClock::new(t0()));
    let registry = NotifierRegistry::new()
        .with(email.clone())
        .with(sms.clone());
    let service = OtpService::new(store.clone(), registry, config).with_clock(clock.clone());
    Harness {
        service,
        store,
        email,
        sms,
        clock,
    }
}

fn harness(config: OtpServiceConfig) -> Harness {
    harness_with(
        config,
        MockNotifier::new(DeliveryMethod::Email),
        MockNotifier::new(DeliveryMethod::Sms),
    )
}

#[tokio::test]
async fn test_issue_challenge_sends_code() {
    let h = harness(OtpServiceConfig::default());

    let outcome = h.service.issue_challenge(EMAIL, "email").await;
    assert_eq!(outcome, IssueOutcome::Sent { method: DeliveryMethod::Email });

    let code = h.email.last_code(EMAIL).expect("code delivered");
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(h.sms.send_count(), 0);
    assert_eq!(h.store.peek(EMAIL).unwrap().code, code);
}

#[tokio::test]
async fn test_issue_respects_configured_length() {
    let config = OtpServiceConfig {
        otp_length: 8,
        ..Default::default()
    };
    let h = harness(config);

    h.service.issue_challenge(PHONE, "sms").await;
    assert_eq!(h.sms.last_code(PHONE).unwrap().len(), 8);
}

#[tokio::test]
async fn test_issue_default_method() {
    let config = OtpServiceConfig {
        default_method: DeliveryMethod::Sms,
        ..Default::default()
    };
    let h = harness(config);

    let outcome = h.service.issue_default_challenge(PHONE).await;
    assert_eq!(outcome, IssueOutcome::Sent { method: DeliveryMethod::Sms });
    assert!(h.sms.last_code(PHONE).is_some());
}

#[tokio::test]
async fn test_unknown_method_writes_nothing() {
    let h = harness(OtpServiceConfig::default());

    let outcome = h.service.issue_challenge(EMAIL, "carrier-pigeon").await;
    assert_eq!(
        outcome,
        IssueOutcome::UnsupportedMethod { method: "carrier-pigeon".to_string() }
    );
    assert!(h.store.is_empty());
    assert_eq!(h.email.send_count() + h.sms.send_count(), 0);
}

#[tokio::test]
async fn test_unconfigured_method_writes_nothing() {
    let store = Arc::new(InMemoryOtpStore::new());
    let email = Arc::new(MockNotifier::new(DeliveryMethod::Email));
    let service = OtpService::new(
        store.clone(),
        NotifierRegistry::new().with(email),
        OtpServiceConfig::default(),
    );

    let outcome = service.issue_challenge(PHONE, "sms").await;
    assert_eq!(outcome, IssueOutcome::UnsupportedMethod { method: "sms".to_string() });
    assert!(store.is_empty());
    assert_eq!(service.supported_methods(), vec![DeliveryMethod::Email]);
}

#[tokio::test]
async fn test_delivery_failure_keeps_challenge_by_default() {
    let h = harness_with(
        OtpServiceConfig::default(),
        MockNotifier::failing(
            DeliveryMethod::Email,
            DeliveryError::Transport("connection refused".to_string()),
        ),
        MockNotifier::new(DeliveryMethod::Sms),
    );

    let outcome = h.service.issue_challenge(EMAIL, "email").await;
    assert_eq!(
        outcome,
        IssueOutcome::DeliveryFailed {
            method: DeliveryMethod::Email,
            reason: "transport error: connection refused".to_string(),
        }
    );

    // The undelivered code stays verifiable for its window
    let code = h.email.last_code(EMAIL).unwrap();
    assert_eq!(h.store.len(), 1);
    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_delivery_failure_discards_when_configured() {
    let config = OtpServiceConfig {
        discard_on_delivery_failure: true,
        ..Default::default()
    };
    let h = harness_with(
        config,
        MockNotifier::failing(DeliveryMethod::Email, DeliveryError::Unavailable),
        MockNotifier::new(DeliveryMethod::Sms),
    );

    let outcome = h.service.issue_challenge(EMAIL, "email").await;
    assert_eq!(outcome.kind(), "delivery_failed");
    assert!(h.store.is_empty());

    let code = h.email.last_code(EMAIL).unwrap();
    assert_eq!(
        h.service.verify_challenge(EMAIL, &code),
        VerifyOutcome::NoSuchChallenge
    );
}

#[tokio::test]
async fn test_reissue_only_second_code_verifies() {
    let h = harness(OtpServiceConfig::default());

    h.service.issue_challenge(EMAIL, "email").await;
    let first = h.email.last_code(EMAIL).unwrap();
    h.service.issue_challenge(EMAIL, "email").await;
    let second = h.email.last_code(EMAIL).unwrap();

    assert_eq!(h.store.len(), 1);
    if first != second {
        assert!(matches!(
            h.service.verify_challenge(EMAIL, &first),
            VerifyOutcome::Mismatch { .. }
        ));
    }
    assert_eq!(h.service.verify_challenge(EMAIL, &second), VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_single_use() {
    let h = harness(OtpServiceConfig::default());

    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();

    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Verified);
    assert_eq!(
        h.service.verify_challenge(EMAIL, &code),
        VerifyOutcome::NoSuchChallenge
    );
}

#[tokio::test]
async fn test_expiry_with_one_second_window() {
    let config = OtpServiceConfig {
        validity_seconds: 1,
        ..Default::default()
    };
    let h = harness(config);

    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();

    h.clock.advance(Duration::milliseconds(1001));
    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Expired);
    assert!(h.store.is_empty());
    assert_eq!(
        h.service.verify_challenge(EMAIL, &code),
        VerifyOutcome::NoSuchChallenge
    );
}

#[tokio::test]
async fn test_verify_at_299_and_301_seconds() {
    let h = harness(OtpServiceConfig::default());

    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();
    h.clock.advance(Duration::seconds(299));
    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Verified);

    h.clock.set(t0());
    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();
    h.clock.advance(Duration::seconds(301));
    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Expired);
}

#[tokio::test]
async fn test_mismatch_then_correct() {
    let h = harness(OtpServiceConfig::default());

    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    assert_eq!(
        h.service.verify_challenge(EMAIL, wrong),
        VerifyOutcome::Mismatch { remaining_attempts: Some(4) }
    );
    h.clock.advance(Duration::seconds(30));
    assert_eq!(h.service.verify_challenge(EMAIL, &code), VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_attempt_cap_forces_new_challenge() {
    let config = OtpServiceConfig {
        max_attempts: Some(2),
        ..Default::default()
    };
    let h = harness(config);

    h.service.issue_challenge(EMAIL, "email").await;
    let code = h.email.last_code(EMAIL).unwrap();
    let wrong = if code == "999999" { "999998" } else { "999999" };

    assert_eq!(
        h.service.verify_challenge(EMAIL, wrong),
        VerifyOutcome::Mismatch { remaining_attempts: Some(1) }
    );
    assert_eq!(
        h.service.verify_challenge(EMAIL, wrong),
        VerifyOutcome::Mismatch { remaining_attempts: Some(0) }
    );
    assert_eq!(
        h.service.verify_challenge(EMAIL, &code),
        VerifyOutcome::NoSuchChallenge
    );

    // A fresh issuance starts over
    h.service.issue_challenge(EMAIL, "email").await;
    let fresh = h.email.last_code(EMAIL).unwrap();
    assert_eq!(h.service.verify_challenge(EMAIL, &fresh), VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_default_config_caps_attempts_over_plain_store() {
    let store = Arc::new(InMemoryOtpStore::new());
    let email = Arc::new(MockNotifier::new(DeliveryMethod::Email));
    let config = OtpServiceConfig::default();
    assert_eq!(config.max_attempts, Some(5));
    let service = OtpService::new(store.clone(), NotifierRegistry::new().with(email.clone()), config);

    service.issue_challenge(EMAIL, "email").await;
    let code = email.last_code(EMAIL).unwrap();
    let wrong = if code == "000000" { "000001" } else { "000000" };

    for remaining in (0..5).rev() {
        assert_eq!(
            service.verify_challenge(EMAIL, wrong),
            VerifyOutcome::Mismatch { remaining_attempts: Some(remaining) }
        );
    }
    assert!(store.is_empty());
    assert_eq!(service.verify_challenge(EMAIL, &code), VerifyOutcome::NoSuchChallenge);
}

#[tokio::test]
async fn test_unknown_identifier() {
    let h = harness(OtpServiceConfig::default());
    assert_eq!(
        h.service.verify_challenge("nobody@b.com", "123456"),
        VerifyOutcome::NoSuchChallenge
    );
}

#[tokio::test]
async fn test_identifiers_are_independent() {
    let h = harness(OtpServiceConfig::default());

    h.service.issue_challenge(EMAIL, "email").await;
    h.service.issue_challenge(PHONE, "sms").await;
    let email_code = h.email.last_code(EMAIL).unwrap();
    let sms_code = h.sms.last_code(PHONE).unwrap();

    assert_eq!(h.service.outstanding_challenges(), 2);
    assert_eq!(h.service.verify_challenge(PHONE, &sms_code), VerifyOutcome::Verified);
    assert_eq!(h.service.verify_challenge(EMAIL, &email_code), VerifyOutcome::Verified);
}

#[tokio::test]
async fn test_purge_expired_uses_service_clock() {
    let config = OtpServiceConfig {
        validity_seconds: 60,
        ..Default::default()
    };
    let h = harness(config);

    h.service.issue_challenge(EMAIL, "email").await;
    assert_eq!(h.service.purge_expired(), 0);
    h.clock.advance(Duration::seconds(61));
    assert_eq!(h.service.purge_expired(), 1);
    assert_eq!(h.service.outstanding_challenges(), 0);
}

#[test]
fn test_config_from_shared() {
    let shared = sd_shared::config::OtpConfig::default().with_max_attempts(0);
    let config = OtpServiceConfig::from_config(&shared).unwrap();

    assert_eq!(config.otp_length, 6);
    assert_eq!(config.validity_seconds, 300);
    assert_eq!(config.default_method, DeliveryMethod::Email);
    assert_eq!(config.max_attempts, None);
}

#[test]
fn test_config_rejects_invalid_shared() {
    let shared = sd_shared::config::OtpConfig::default().with_length(2);
    assert!(OtpServiceConfig::try_from(&shared).is_err());
}
