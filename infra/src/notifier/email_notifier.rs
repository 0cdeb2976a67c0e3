//! Email delivery of OTP codes

use async_trait::async_trait;
use sd_core::{DeliveryError, DeliveryMethod, OtpNotifier};
use sd_shared::utils::is_valid_email;
use std::sync::Arc;

use super::message::render_code_message;
use crate::email::EmailSender;

/// Sends codes by email through any [`EmailSender`]
pub struct EmailOtpNotifier {
    sender: Arc<dyn EmailSender>,
    subject: String,
    validity_seconds: u64,
}

impl EmailOtpNotifier {
    pub fn new(sender: Arc<dyn EmailSender>, subject: impl Into<String>, validity_seconds: u64) -> Self {
        Self {
            sender,
            subject: subject.into(),
            validity_seconds,
        }
    }
}

#[async_trait]
impl OtpNotifier for EmailOtpNotifier {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Email
    }

    async fn send(&self, destination: &str, code: &str) -> Result<(), DeliveryError> {
        let destination = destination.trim();
        if !is_valid_email(destination) {
            return Err(DeliveryError::InvalidDestination(
                "not a valid email address".to_string(),
            ));
        }

        let body = render_code_message(code, self.validity_seconds);
        self.sender
            .send_email(destination, &self.subject, &body)
            .await?;
        Ok(())
    }
}
