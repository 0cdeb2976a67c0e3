//! Delivery provider configuration (SMTP email and SMS)

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Which email backend delivers codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Log to console, never leaves the process
    Mock,
    /// Real SMTP relay
    Smtp,
}

impl Default for EmailProvider {
    fn default() -> Self {
        EmailProvider::Mock
    }
}

impl std::str::FromStr for EmailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(EmailProvider::Mock),
            "smtp" => Ok(EmailProvider::Smtp),
            _ => Err(format!("Invalid email provider: {}", s)),
        }
    }
}

/// SMTP relay settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmtpConfig {
    /// Relay host name
    pub host: String,
    /// Relay port; 465 means implicit TLS, anything else uses STARTTLS
    pub port: u16,
    /// Login user
    pub username: String,
    /// Login password
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Envelope and header sender address
    pub sender: String,
    /// Subject line of OTP emails
    pub subject: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::from("localhost"),
            port: 587,
            username: String::new(),
            password: String::new(),
            sender: String::from("no-reply@localhost"),
            subject: String::from("Your OTP Code"),
        }
    }
}

impl SmtpConfig {
    /// Load SMTP configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let username = std::env::var("EMAIL_USER").unwrap_or(defaults.username);
        Self {
            host: std::env::var("EMAIL_HOST").unwrap_or(defaults.host),
            port: env_or("EMAIL_PORT", defaults.port),
            sender: std::env::var("SENDER_EMAIL").unwrap_or_else(|_| {
                if username.is_empty() {
                    defaults.sender
                } else {
                    username.clone()
                }
            }),
            username,
            password: std::env::var("EMAIL_PASS").unwrap_or(defaults.password),
            subject: std::env::var("EMAIL_SUBJECT").unwrap_or(defaults.subject),
        }
    }

    /// Whether the port implies implicit TLS rather than STARTTLS
    pub fn uses_implicit_tls(&self) -> bool {
        self.port == 465
    }
}

/// SMS provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("twilio", "mock")
    pub provider: String,
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    #[serde(skip_serializing, default)]
    pub auth_token: String,
    /// From phone number (E.164)
    pub from_number: String,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::from("+15005550006"),
        }
    }
}

impl SmsConfig {
    /// Load SMS configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.provider),
            account_sid: std::env::var("TWILIO_ACCOUNT_SID").unwrap_or(defaults.account_sid),
            auth_token: std::env::var("TWILIO_AUTH_TOKEN").unwrap_or(defaults.auth_token),
            from_number: std::env::var("TWILIO_FROM_NUMBER").unwrap_or(defaults.from_number),
        }
    }
}

/// All delivery channel settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeliveryConfig {
    /// Email backend selection
    #[serde(default)]
    pub email_provider: EmailProvider,
    /// SMTP settings, used when `email_provider` is `Smtp`
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// SMS settings
    #[serde(default)]
    pub sms: SmsConfig,
}

impl DeliveryConfig {
    /// Load delivery configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            email_provider: env_or("EMAIL_PROVIDER", EmailProvider::default()),
            smtp: SmtpConfig::from_env(),
            sms: SmsConfig::from_env(),
        }
    }

    /// Real providers need credentials
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.email_provider == EmailProvider::Smtp {
            if self.smtp.host.trim().is_empty() {
                return Err(ConfigError::Missing {
                    field: "EMAIL_HOST".to_string(),
                });
            }
            if self.smtp.username.is_empty() || self.smtp.password.is_empty() {
                return Err(ConfigError::Missing {
                    field: "EMAIL_USER/EMAIL_PASS".to_string(),
                });
            }
        }
        match self.sms.provider.as_str() {
            "mock" => Ok(()),
            "twilio" => {
                if self.sms.account_sid.is_empty() || self.sms.auth_token.is_empty() {
                    return Err(ConfigError::Missing {
                        field: "TWILIO_ACCOUNT_SID/TWILIO_AUTH_TOKEN".to_string(),
                    });
                }
                Ok(())
            }
            other => Err(ConfigError::invalid(
                "sms.provider",
                format!("unknown provider '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_provider_from_str() {
        assert_eq!("smtp".parse::<EmailProvider>(), Ok(EmailProvider::Smtp));
        assert_eq!(" MOCK ".parse::<EmailProvider>(), Ok(EmailProvider::Mock));
        assert!("sendgrid".parse::<EmailProvider>().is_err());
    }

    #[test]
    fn test_implicit_tls_port() {
        let mut config = SmtpConfig::default();
        assert!(!config.uses_implicit_tls());
        config.port = 465;
        assert!(config.uses_implicit_tls());
    }

    #[test]
    fn test_default_delivery_is_valid() {
        assert!(DeliveryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_smtp_requires_credentials() {
        let config = DeliveryConfig {
            email_provider: EmailProvider::Smtp,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_unknown_sms_provider_rejected() {
        let mut config = DeliveryConfig::default();
        config.sms.provider = "carrier-pigeon".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let mut config = SmtpConfig::default();
        config.password = "hunter2".to_string();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("hunter2"));
    }
}
