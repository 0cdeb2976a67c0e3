//! OTP service: the caller-facing contract used by the dialogue/tool layer

use std::sync::Arc;

use sd_shared::utils::mask_identifier;

use crate::domain::value_objects::{DeliveryMethod, IssueOutcome, VerifyOutcome};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::generator::generate_code;
use super::notifier::NotifierRegistry;
use super::store::OtpStore;

/// Issues and verifies OTP challenges
///
/// Stateless request/response over the store: the conversational flow
/// (ask for identifier, send, ask for code, verify) lives in the calling layer.
pub struct OtpService<S: OtpStore> {
    /// Outstanding challenges
    store: Arc<S>,
    /// Delivery channels
    notifiers: NotifierRegistry,
    /// Service configuration
    config: OtpServiceConfig,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
}

impl<S: OtpStore> OtpService<S> {
    /// Create a new OTP service reading the system clock
    ///
    /// # Arguments
    ///
    /// * `store` - Store holding outstanding challenges
    /// * `notifiers` - One notifier per supported delivery method
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, notifiers: NotifierRegistry, config: OtpServiceConfig) -> Self {
        Self {
            store,
            notifiers,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Methods the caller may request
    pub fn supported_methods(&self) -> Vec<DeliveryMethod> {
        self.notifiers.methods()
    }

    /// Issue a challenge through a method named by the caller
    ///
    /// Unknown or unconfigured methods yield `UnsupportedMethod` without
    /// generating or storing anything.
    pub async fn issue_challenge(&self, identifier: &str, method: &str) -> IssueOutcome {
        match method.parse::<DeliveryMethod>() {
            Ok(method) => self.issue_challenge_via(identifier, method).await,
            Err(_) => {
                tracing::warn!(
                    identifier = %mask_identifier(identifier),
                    method = method,
                    event = "otp_unsupported_method",
                    "Rejected OTP issuance for unknown delivery method"
                );
                IssueOutcome::UnsupportedMethod {
                    method: method.to_string(),
                }
            }
        }
    }

    /// Issue a challenge through the configured default method
    pub async fn issue_default_challenge(&self, identifier: &str) -> IssueOutcome {
        self.issue_challenge_via(identifier, self.config.default_method)
            .await
    }

    /// Issue a challenge through a typed method
    ///
    /// This method:
    /// 1. Resolves the notifier for `method`
    /// 2. Generates a fresh code
    /// 3. Stores it, replacing any outstanding code for `identifier`
    /// 4. Delivers it with no store state held
    ///
    /// On delivery failure the code stays outstanding unless
    /// `discard_on_delivery_failure` is set.
    pub async fn issue_challenge_via(&self, identifier: &str, method: DeliveryMethod) -> IssueOutcome {
        let masked = mask_identifier(identifier);

        let Some(notifier) = self.notifiers.get(method) else {
            tracing::warn!(
                identifier = %masked,
                method = %method,
                event = "otp_unsupported_method",
                "Rejected OTP issuance for unconfigured delivery method"
            );
            return IssueOutcome::UnsupportedMethod {
                method: method.to_string(),
            };
        };

        let code = generate_code(self.config.otp_length);
        let now = self.clock.now();
        self.store
            .put(identifier, &code, self.config.validity_seconds, now);

        tracing::info!(
            identifier = %masked,
            method = %method,
            validity_seconds = self.config.validity_seconds,
            event = "otp_issued",
            "Issued OTP challenge"
        );

        match notifier.send(identifier, &code).await {
            Ok(()) => {
                tracing::info!(
                    identifier = %masked,
                    method = %method,
                    event = "otp_delivered",
                    "OTP delivered"
                );
                IssueOutcome::Sent { method }
            }
            Err(e) => {
                let discarded = self.config.discard_on_delivery_failure
                    && self.store.discard_if_code(identifier, &code);
                tracing::error!(
                    identifier = %masked,
                    method = %method,
                    error = %e,
                    retryable = e.is_retryable(),
                    discarded = discarded,
                    event = "otp_delivery_failed",
                    "OTP delivery failed"
                );
                IssueOutcome::DeliveryFailed {
                    method,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Check a candidate code for an identifier
    ///
    /// Maps one-to-one onto the store outcome. Verified and expired challenges
    /// are consumed; a mismatch keeps the challenge until `config.max_attempts`
    /// wrong codes have been tried.
    pub fn verify_challenge(&self, identifier: &str, candidate: &str) -> VerifyOutcome {
        let now = self.clock.now();
        let outcome = self
            .store
            .take_if_valid(identifier, candidate, self.config.max_attempts, now);
        let masked = mask_identifier(identifier);

        match &outcome {
            VerifyOutcome::Verified => tracing::info!(
                identifier = %masked,
                event = "otp_verified",
                "OTP verified"
            ),
            VerifyOutcome::NoSuchChallenge => tracing::info!(
                identifier = %masked,
                event = "otp_no_such_challenge",
                "OTP verification without an outstanding challenge"
            ),
            VerifyOutcome::Expired => tracing::info!(
                identifier = %masked,
                event = "otp_expired",
                "OTP verification after expiry"
            ),
            VerifyOutcome::Mismatch { remaining_attempts } => {
                if *remaining_attempts == Some(0) {
                    tracing::warn!(
                        identifier = %masked,
                        event = "otp_attempts_exhausted",
                        "OTP challenge dropped after too many failed attempts"
                    );
                } else {
                    tracing::warn!(
                        identifier = %masked,
                        remaining_attempts = ?remaining_attempts,
                        event = "otp_mismatch",
                        "OTP verification with wrong code"
                    );
                }
            }
        }

        outcome
    }

    /// Drop expired challenges now
    pub fn purge_expired(&self) -> usize {
        let removed = self.store.purge_expired(self.clock.now());
        if removed > 0 {
            tracing::debug!(removed = removed, event = "otp_purged", "Purged expired OTP challenges");
        }
        removed
    }

    /// Number of outstanding challenges
    pub fn outstanding_challenges(&self) -> usize {
        self.store.len()
    }
}
