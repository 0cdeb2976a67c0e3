//! Registry assembly from application configuration

use sd_core::NotifierRegistry;
use sd_shared::config::AppConfig;
use std::sync::Arc;
use tracing::info;

use super::{EmailOtpNotifier, SmsOtpNotifier};
use crate::email::create_email_service;
use crate::sms::create_sms_service;

/// Build a registry with an email and an SMS notifier
///
/// Mock providers print message content to the console only in development.
pub fn build_notifier_registry(config: &AppConfig) -> NotifierRegistry {
    let console_output = config.environment.mock_console_output();
    let validity_seconds = config.otp.validity_seconds;

    let email = create_email_service(&config.delivery, console_output);
    let sms = create_sms_service(&config.delivery.sms, console_output);

    info!(
        email_provider = email.provider_name(),
        sms_provider = sms.provider_name(),
        "Configured OTP notifiers"
    );

    NotifierRegistry::new()
        .with(Arc::new(EmailOtpNotifier::new(
            email,
            config.delivery.smtp.subject.clone(),
            validity_seconds,
        )))
        .with(Arc::new(SmsOtpNotifier::new(sms, validity_seconds)))
}
