//! Email Service Interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Email sender trait for plain-text messages
///
/// Implementations include:
/// - SMTP relay
/// - Mock implementation for development
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send a plain-text email
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `subject` - Subject line
    /// * `body` - Plain-text body
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Provider reference for the accepted message
    /// * `Err(InfrastructureError)` - If the recipient is rejected or sending fails
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError>;

    /// Get the service provider name
    fn provider_name(&self) -> &str;
}
