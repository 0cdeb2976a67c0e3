//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for SupportDesk. It provides
//! concrete delivery providers for OTP challenges and adapts them to the core
//! `OtpNotifier` boundary.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Email**: SMTP delivery via lettre, plus a console mock
//! - **SMS**: Twilio delivery, plus a console mock
//! - **Notifier**: adapters from providers to `OtpNotifier` and a
//!   configuration-driven registry factory
//!
//! ## Features
//!
//! - `twilio-sms`: Enable Twilio SMS service (default)

// Re-export core types for convenience
pub use sd_core::errors::*;

/// Email service module - SMTP and mock providers
pub mod email;

/// SMS service module - External SMS providers
pub mod sms;

/// Notifier adapters and registry factory
pub mod notifier;

pub use notifier::build_notifier_registry;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email service error
    #[error("Email service error: {0}")]
    Email(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),

    /// Recipient rejected before sending
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),
}

impl From<InfrastructureError> for DeliveryError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Config(msg) => DeliveryError::Configuration(msg),
            InfrastructureError::InvalidRecipient(msg) => DeliveryError::InvalidDestination(msg),
            InfrastructureError::Email(msg) | InfrastructureError::Sms(msg) => {
                DeliveryError::Transport(msg)
            }
        }
    }
}
