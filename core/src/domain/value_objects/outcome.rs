//! Outcomes of the two OTP operations.
//!
//! Both enums carry a stable machine tag (`kind`) for the calling layer and
//! tests, and a `message` that the conversational layer shows to the end user
//! verbatim. Neither ever contains the code itself.

use serde::Serialize;

use super::delivery_method::DeliveryMethod;

/// Result of checking a candidate code
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Code matched within its window; the challenge is consumed
    Verified,
    /// Nothing outstanding for the identifier (never issued, consumed, or locked out)
    NoSuchChallenge,
    /// The window had closed; the challenge is consumed
    Expired,
    /// Wrong code. `remaining_attempts` is `None` when attempts are uncapped,
    /// `Some(0)` when this attempt exhausted the cap and the challenge was dropped
    Mismatch { remaining_attempts: Option<u32> },
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerifyOutcome::Verified)
    }

    /// Stable machine tag
    pub fn kind(&self) -> &'static str {
        match self {
            VerifyOutcome::Verified => "verified",
            VerifyOutcome::NoSuchChallenge => "no_such_challenge",
            VerifyOutcome::Expired => "expired",
            VerifyOutcome::Mismatch { .. } => "mismatch",
        }
    }

    /// User-facing text
    pub fn message(&self) -> String {
        match self {
            VerifyOutcome::Verified => "Your identity has been verified.".to_string(),
            VerifyOutcome::NoSuchChallenge => {
                "There is no active verification code for you. Please request a new code.".to_string()
            }
            VerifyOutcome::Expired => {
                "That code has expired. Please request a new one.".to_string()
            }
            VerifyOutcome::Mismatch { remaining_attempts: None } => {
                "That code is incorrect. Please try again.".to_string()
            }
            VerifyOutcome::Mismatch { remaining_attempts: Some(0) } => {
                "That code is incorrect and no attempts remain. Please request a new code.".to_string()
            }
            VerifyOutcome::Mismatch { remaining_attempts: Some(n) } => format!(
                "That code is incorrect. Please try again ({} attempt{} remaining).",
                n,
                if *n == 1 { "" } else { "s" }
            ),
        }
    }
}

/// Result of issuing a challenge
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IssueOutcome {
    /// Code stored and handed to the notifier successfully
    Sent { method: DeliveryMethod },
    /// Code stored but the notifier reported an error
    DeliveryFailed { method: DeliveryMethod, reason: String },
    /// Method unknown or not configured; nothing was stored
    UnsupportedMethod { method: String },
}

impl IssueOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, IssueOutcome::Sent { .. })
    }

    /// Stable machine tag
    pub fn kind(&self) -> &'static str {
        match self {
            IssueOutcome::Sent { .. } => "sent",
            IssueOutcome::DeliveryFailed { .. } => "delivery_failed",
            IssueOutcome::UnsupportedMethod { .. } => "unsupported_method",
        }
    }

    /// User-facing text
    pub fn message(&self) -> String {
        match self {
            IssueOutcome::Sent { method } => format!(
                "A verification code has been sent to your {}.",
                method.destination_noun()
            ),
            IssueOutcome::DeliveryFailed { reason, .. } => format!(
                "We couldn't send your verification code ({}). Please try again.",
                reason
            ),
            IssueOutcome::UnsupportedMethod { method } => format!(
                "'{}' is not a supported delivery method. Please choose email or sms.",
                method
            ),
        }
    }
}
