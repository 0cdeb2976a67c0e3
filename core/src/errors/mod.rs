//! Domain-specific error types and error handling.
//!
//! Per-request OTP conditions (unknown identifier, expiry, mismatch, delivery
//! failure, unsupported method) are outcomes, not errors. The types here cover
//! the notifier boundary and construction-time failures.

mod delivery;


pub use delivery::DeliveryError;

use sd_shared::config::ConfigError;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

pub type DomainResult<T> = Result<T, DomainError>;
