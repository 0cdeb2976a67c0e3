//! Email Service Module
//!
//! This module provides email delivery for one-time codes.
//!
//! ## Features
//!
//! - **Email Sender Trait**: Common interface for all email providers
//! - **SMTP Implementation**: Delivery through an authenticated relay (lettre)
//! - **Mock Implementation**: Console output for development
//! - **Security**: Address masking in logs

pub mod email_service;
pub mod mock_email;
pub mod smtp;

pub use email_service::EmailSender;
pub use mock_email::{MockEmailService, SentEmail};
pub use smtp::SmtpEmailService;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use sd_shared::config::{DeliveryConfig, EmailProvider};

/// Create an email sender based on configuration
///
/// An SMTP relay that cannot be built falls back to the mock sender with a
/// warning, mirroring the SMS factory.
pub fn create_email_service(config: &DeliveryConfig, console_output: bool) -> Arc<dyn EmailSender> {
    match config.email_provider {
        EmailProvider::Mock => Arc::new(MockEmailService::with_options(console_output, false)),
        EmailProvider::Smtp => match SmtpEmailService::new(&config.smtp) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize SMTP email service");
                tracing::warn!("Falling back to mock email service");
                Arc::new(MockEmailService::with_options(console_output, false))
            }
        },
    }
}
