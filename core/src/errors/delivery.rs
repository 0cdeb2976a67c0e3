//! Errors reported by out-of-band notifiers

use thiserror::Error;

/// Failure to hand a code to its destination
///
/// The service does not interpret these beyond their `Display` text, which is
/// surfaced to the caller as the delivery failure reason.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("invalid destination: {0}")]
    InvalidDestination(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("delivery service unavailable")]
    Unavailable,

    #[error("delivery misconfigured: {0}")]
    Configuration(String),
}

impl DeliveryError {
    /// Whether re-issuing could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, DeliveryError::Transport(_) | DeliveryError::Unavailable)
    }
}
