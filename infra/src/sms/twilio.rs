//! Twilio SMS Service Implementation
//!
//! This module provides SMS sending capabilities using the Twilio API.
//! It implements the SmsService trait for production SMS delivery.
//!
//! ## Features
//!
//! - International SMS support with E.164 format validation
//! - Automatic retry logic with exponential backoff
//! - Per-request timeout
//! - Security: Phone number masking in logs

use async_trait::async_trait;
use phonenumber::{Mode, PhoneNumber};
use sd_shared::config::SmsConfig;
use sd_shared::utils::mask_identifier;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use twilio::{Client, OutboundMessage};

use crate::{
    sms::sms_service::{normalize_recipient, SmsService},
    InfrastructureError,
};

/// Twilio's per-message body limit
const MAX_MESSAGE_LENGTH: usize = 1600;

/// Twilio SMS service configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
    /// Maximum attempts for failed requests
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TwilioConfig {
    /// Build configuration from the shared SMS settings
    pub fn from_sms_config(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() {
            return Err(InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()));
        }
        if config.auth_token.is_empty() {
            return Err(InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
            max_retries: 3,
            retry_delay_ms: 1000,
            request_timeout_secs: 30,
        })
    }
}

/// Twilio SMS service implementation
pub struct TwilioSmsService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioSmsService {
    /// Create a new Twilio SMS service
    pub fn new(config: TwilioConfig) -> Result<Self, InfrastructureError> {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            from_number = %mask_identifier(&config.from_number),
            "Twilio SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// Validate and normalize phone number to E.164 format
    fn validate_phone_number(&self, phone: &str) -> Result<String, InfrastructureError> {
        let normalized = normalize_recipient(phone)?;
        match normalized.parse::<PhoneNumber>() {
            Ok(parsed) => {
                let formatted = parsed.format().mode(Mode::E164).to_string();
                debug!(phone = %mask_identifier(&formatted), "Validated phone number");
                Ok(formatted)
            }
            Err(e) => Err(InfrastructureError::InvalidRecipient(format!(
                "Invalid phone number: {}",
                e
            ))),
        }
    }

    /// Send SMS with retry logic
    async fn send_with_retry(&self, to: &str, message: &str) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let timeout = Duration::from_secs(self.config.request_timeout_secs);

        loop {
            attempts += 1;

            debug!(
                attempt = attempts,
                max_retries = self.config.max_retries,
                phone = %mask_identifier(to),
                "Sending SMS"
            );

            let msg = OutboundMessage::new(&self.config.from_number, to, message);

            let error_msg = match tokio::time::timeout(timeout, self.client.send_message(msg)).await {
                Ok(Ok(response)) => {
                    info!(
                        phone = %mask_identifier(to),
                        sid = %response.sid,
                        "SMS sent successfully"
                    );
                    return Ok(response.sid);
                }
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!("request timed out after {}s", self.config.request_timeout_secs),
            };

            error!(
                attempt = attempts,
                max_retries = self.config.max_retries,
                error = %error_msg,
                "Failed to send SMS"
            );

            if attempts >= self.config.max_retries {
                return Err(InfrastructureError::Sms(format!(
                    "Failed to send SMS after {} attempts: {}",
                    self.config.max_retries, error_msg
                )));
            }

            if error_msg.contains("400") || error_msg.contains("invalid") {
                // Client errors do not improve on retry
                return Err(InfrastructureError::Sms(format!("Invalid request: {}", error_msg)));
            } else if error_msg.contains("429") || error_msg.contains("rate") {
                warn!(delay_ms = delay.as_millis() as u64, "Rate limit detected, backing off");
            } else {
                warn!(delay_ms = delay.as_millis() as u64, "Retrying SMS send");
            }

            tokio::time::sleep(delay).await;
            delay *= 2;
        }
    }
}

#[async_trait]
impl SmsService for TwilioSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        let normalized_phone = self.validate_phone_number(phone_number)?;

        if message.len() > MAX_MESSAGE_LENGTH {
            return Err(InfrastructureError::Sms(format!(
                "Message exceeds maximum length of {} characters",
                MAX_MESSAGE_LENGTH
            )));
        }

        info!(
            phone = %mask_identifier(&normalized_phone),
            message_length = message.len(),
            "Sending SMS via Twilio"
        );

        self.send_with_retry(&normalized_phone, message).await
    }

    fn provider_name(&self) -> &str {
        "Twilio"
    }
}
