//! Adapters from delivery providers to the core `OtpNotifier` boundary

pub mod email_notifier;
pub mod factory;
pub mod message;
pub mod sms_notifier;

pub use email_notifier::EmailOtpNotifier;
pub use factory::build_notifier_registry;
pub use message::render_code_message;
pub use sms_notifier::SmsOtpNotifier;

#[cfg(test)]
mod tests;
