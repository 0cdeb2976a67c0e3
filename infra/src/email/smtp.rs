//! SMTP Email Service Implementation
//!
//! Sends plain-text mail through an authenticated relay. Port 465 uses
//! implicit TLS; every other port upgrades with STARTTLS.

use async_trait::async_trait;
use lettre::message::{header::ContentType, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use sd_shared::config::SmtpConfig;
use sd_shared::utils::mask_identifier;
use std::time::Duration;
use tracing::{error, info};

use super::email_service::EmailSender;
use crate::InfrastructureError;

/// Upper bound on a single SMTP session
const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// SMTP email service
pub struct SmtpEmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: Mailbox,
    host: String,
}

impl SmtpEmailService {
    /// Build the transport for `config`
    ///
    /// No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, InfrastructureError> {
        let from_address: Mailbox = config.sender.parse().map_err(|e| {
            InfrastructureError::Config(format!("Invalid sender address '{}': {}", config.sender, e))
        })?;

        let builder = if config.uses_implicit_tls() {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP relay '{}': {}", config.host, e)))?;

        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = builder
            .port(config.port)
            .credentials(creds)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        info!(
            host = %config.host,
            port = config.port,
            implicit_tls = config.uses_implicit_tls(),
            "SMTP email service initialized"
        );

        Ok(Self {
            mailer,
            from_address,
            host: config.host.clone(),
        })
    }

    /// Relay host this service sends through
    pub fn host(&self) -> &str {
        &self.host
    }

    fn build_message(&self, to: &str, subject: &str, body: &str) -> Result<Message, InfrastructureError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::InvalidRecipient(format!("{}", e)))?;

        Message::builder()
            .from(self.from_address.clone())
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailService {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<String, InfrastructureError> {
        let email = self.build_message(to, subject, body)?;
        let masked = mask_identifier(to);

        match self.mailer.send(email).await {
            Ok(response) => {
                let code = response.code().to_string();
                info!(to = %masked, smtp_code = %code, "Email sent successfully");
                Ok(code)
            }
            Err(e) => {
                error!(
                    to = %masked,
                    permanent = e.is_permanent(),
                    error = %e,
                    "Failed to send email"
                );
                Err(InfrastructureError::Email(e.to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }
}
