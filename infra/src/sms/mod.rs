//! SMS Service Module
//!
//! This module provides SMS service implementations for delivering one-time
//! codes. It includes a Twilio provider and a mock implementation for
//! development.
//!
//! ## Features
//!
//! - **SMS Service Trait**: Common interface for all SMS providers
//! - **Mock Implementation**: Console output for development
//! - **Twilio Support**: Production SMS via Twilio API
//! - **Phone Number Validation**: E.164 format validation
//! - **Security**: Phone number masking in logs

pub mod mock_sms;
pub mod sms_service;

// Twilio SMS service (feature-gated)
#[cfg(feature = "twilio-sms")]
pub mod twilio;

// Re-export commonly used types
pub use mock_sms::MockSmsService;
pub use sms_service::{is_valid_phone_number, SmsService};

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioSmsService};

#[cfg(test)]
mod tests;

use std::sync::Arc;

use sd_shared::config::SmsConfig;

/// Create an SMS service based on configuration
///
/// Unknown providers, a disabled `twilio-sms` feature, or a Twilio
/// initialization failure all fall back to the mock service with a warning.
///
/// # Arguments
///
/// * `config` - SMS configuration containing provider settings
/// * `console_output` - Whether the mock fallback prints messages to stdout
pub fn create_sms_service(config: &SmsConfig, console_output: bool) -> Arc<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockSmsService::with_options(console_output, false)),
        #[cfg(feature = "twilio-sms")]
        "twilio" => match TwilioConfig::from_sms_config(config).and_then(TwilioSmsService::new) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Twilio SMS service");
                tracing::warn!("Falling back to mock SMS service");
                Arc::new(MockSmsService::with_options(console_output, false))
            }
        },
        other => {
            tracing::warn!(
                provider = other,
                "Unknown or disabled SMS provider, using mock implementation"
            );
            Arc::new(MockSmsService::with_options(console_output, false))
        }
    }
}
