//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `delivery` - Email (SMTP) and SMS provider settings
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time password issuance and verification policy
//! - `server` - HTTP server configuration
//!
//! Every sub-configuration exposes `from_env()`; values that are missing or
//! unparsable fall back to their defaults.

pub mod delivery;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use delivery::{DeliveryConfig, EmailProvider, SmsConfig, SmtpConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Configuration validation failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// OTP policy
    pub otp: OtpConfig,

    /// Delivery providers
    pub delivery: DeliveryConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            otp: OtpConfig::default(),
            delivery: DeliveryConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            otp: OtpConfig::from_env(),
            delivery: DeliveryConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Validate every sub-configuration that carries constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.otp.validate()?;
        self.delivery.validate()?;
        Ok(())
    }
}

/// Read an environment variable and parse it, falling back to `default`
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
