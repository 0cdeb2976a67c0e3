//! SMS Service Interface
//!
//! Defines the trait for SMS service implementations that deliver text
//! messages to phone numbers.

use async_trait::async_trait;
use sd_shared::utils::{is_valid_international_phone, normalize_phone_number};

use crate::InfrastructureError;

/// SMS service trait for sending text messages
///
/// Implementations include:
/// - Twilio SMS API
/// - Mock implementation for development
#[async_trait]
pub trait SmsService: Send + Sync {
    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `phone_number` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Unique identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    ///
    /// Returns the name of the SMS service provider (e.g., "Twilio", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the service is available
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Validate phone number format (E.164)
///
/// Formatting characters (spaces, dashes, parentheses) are ignored; the
/// remaining digits must start with '+' and a non-zero country code.
///
/// # Example
///
/// ```ignore
/// assert!(is_valid_phone_number("+1 415 555 2671"));
/// assert!(!is_valid_phone_number("4155552671")); // Missing '+'
/// ```
pub fn is_valid_phone_number(phone: &str) -> bool {
    is_valid_international_phone(phone)
}

/// Strip formatting and validate, returning the E.164 form
pub(crate) fn normalize_recipient(phone: &str) -> Result<String, InfrastructureError> {
    let normalized = normalize_phone_number(phone);
    if is_valid_international_phone(&normalized) {
        Ok(normalized)
    } else {
        Err(InfrastructureError::InvalidRecipient(
            "phone number must be in E.164 format (e.g., +14155552671)".to_string(),
        ))
    }
}
