//! One-time password policy configuration

use serde::{Deserialize, Serialize};

use super::{env_or, ConfigError};

/// Shortest code length accepted by `validate`
pub const MIN_OTP_LENGTH: usize = 4;

/// Longest code length accepted by `validate`
pub const MAX_OTP_LENGTH: usize = 10;

/// OTP issuance and verification policy
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of digits in a generated code
    #[serde(default = "default_otp_length")]
    pub otp_length: usize,

    /// Seconds a code stays verifiable after issuance
    #[serde(default = "default_validity_seconds")]
    pub validity_seconds: u64,

    /// Delivery method used when the caller does not name one ("email" or "sms")
    #[serde(default = "default_delivery_method")]
    pub delivery_method: String,

    /// Failed verification attempts allowed per code (0 = unlimited)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Drop the outstanding code when delivery fails instead of keeping it
    #[serde(default)]
    pub discard_on_delivery_failure: bool,

    /// Seconds between background sweeps of expired codes (0 = disabled)
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            otp_length: default_otp_length(),
            validity_seconds: default_validity_seconds(),
            delivery_method: default_delivery_method(),
            max_attempts: default_max_attempts(),
            discard_on_delivery_failure: false,
            sweep_interval_seconds: default_sweep_interval_seconds(),
        }
    }
}

impl OtpConfig {
    /// Load OTP configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            otp_length: env_or("OTP_LENGTH", defaults.otp_length),
            validity_seconds: env_or("OTP_VALIDITY_SECONDS", defaults.validity_seconds),
            delivery_method: std::env::var("OTP_DELIVERY_METHOD")
                .map(|v| v.trim().to_lowercase())
                .unwrap_or(defaults.delivery_method),
            max_attempts: env_or("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            discard_on_delivery_failure: env_or(
                "OTP_DISCARD_ON_DELIVERY_FAILURE",
                defaults.discard_on_delivery_failure,
            ),
            sweep_interval_seconds: env_or(
                "OTP_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }

    /// Set the code length
    pub fn with_length(mut self, otp_length: usize) -> Self {
        self.otp_length = otp_length;
        self
    }

    /// Set the validity window in seconds
    pub fn with_validity_seconds(mut self, validity_seconds: u64) -> Self {
        self.validity_seconds = validity_seconds;
        self
    }

    /// Set the failed-attempt cap
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_OTP_LENGTH..=MAX_OTP_LENGTH).contains(&self.otp_length) {
            return Err(ConfigError::invalid(
                "otp_length",
                format!("must be between {} and {}", MIN_OTP_LENGTH, MAX_OTP_LENGTH),
            ));
        }
        if self.validity_seconds == 0 {
            return Err(ConfigError::invalid("validity_seconds", "must be at least 1"));
        }
        if !matches!(self.delivery_method.as_str(), "email" | "sms") {
            return Err(ConfigError::invalid(
                "delivery_method",
                format!("unsupported method '{}'", self.delivery_method),
            ));
        }
        Ok(())
    }
}

fn default_otp_length() -> usize {
    6
}

fn default_validity_seconds() -> u64 {
    300
}

fn default_delivery_method() -> String {
    String::from("email")
}

fn default_max_attempts() -> u32 {
    5
}

fn default_sweep_interval_seconds() -> u64 {
    60
}
