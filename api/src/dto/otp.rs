use sd_core::{IssueOutcome, VerifyOutcome};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Email address or E.164 phone number the code is sent to
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    /// "email" or "sms"; the configured default when absent
    #[serde(default)]
    pub method: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    /// Identifier the code was sent to
    #[validate(length(min = 1, max = 254))]
    pub identifier: String,

    /// Code as typed by the user
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendCodeResponse {
    /// sent | delivery_failed | unsupported_method
    pub outcome: String,
    pub message: String,
    pub method: String,
}

impl From<&IssueOutcome> for SendCodeResponse {
    fn from(outcome: &IssueOutcome) -> Self {
        let method = match outcome {
            IssueOutcome::Sent { method } | IssueOutcome::DeliveryFailed { method, .. } => {
                method.to_string()
            }
            IssueOutcome::UnsupportedMethod { method } => method.clone(),
        };
        Self {
            outcome: outcome.kind().to_string(),
            message: outcome.message(),
            method,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyCodeResponse {
    /// verified | no_such_challenge | expired | mismatch
    pub outcome: String,
    pub verified: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_attempts: Option<u32>,
}

impl From<&VerifyOutcome> for VerifyCodeResponse {
    fn from(outcome: &VerifyOutcome) -> Self {
        let remaining_attempts = match outcome {
            VerifyOutcome::Mismatch { remaining_attempts } => *remaining_attempts,
            _ => None,
        };
        Self {
            outcome: outcome.kind().to_string(),
            verified: outcome.is_verified(),
            message: outcome.message(),
            remaining_attempts,
        }
    }
}
