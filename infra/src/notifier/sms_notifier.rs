//! SMS delivery of OTP codes

use async_trait::async_trait;
use sd_core::{DeliveryError, DeliveryMethod, OtpNotifier};
use sd_shared::utils::is_valid_international_phone;
use std::sync::Arc;

use super::message::render_code_message;
use crate::sms::SmsService;

/// Sends codes by SMS through any [`SmsService`]
pub struct SmsOtpNotifier {
    sms: Arc<dyn SmsService>,
    validity_seconds: u64,
}

impl SmsOtpNotifier {
    pub fn new(sms: Arc<dyn SmsService>, validity_seconds: u64) -> Self {
        Self {
            sms,
            validity_seconds,
        }
    }
}

#[async_trait]
impl OtpNotifier for SmsOtpNotifier {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Sms
    }

    async fn send(&self, destination: &str, code: &str) -> Result<(), DeliveryError> {
        if !is_valid_international_phone(destination) {
            return Err(DeliveryError::InvalidDestination(
                "phone number must be in E.164 format".to_string(),
            ));
        }

        let body = render_code_message(code, self.validity_seconds);
        self.sms.send_sms(destination, &body).await?;
        Ok(())
    }
}
