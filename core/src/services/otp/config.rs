//! Configuration for the OTP service

use sd_shared::config::OtpConfig;

use crate::domain::entities::{DEFAULT_OTP_LENGTH, DEFAULT_VALIDITY_SECONDS};
use crate::domain::value_objects::DeliveryMethod;
use crate::errors::{DomainError, DomainResult};

/// Validated, typed view of [`OtpConfig`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpServiceConfig {
    /// Digits per generated code
    pub otp_length: usize,
    /// Seconds a code stays verifiable
    pub validity_seconds: u64,
    /// Method used by `issue_default_challenge`
    pub default_method: DeliveryMethod,
    /// Failed attempts before the challenge is dropped; `None` means uncapped
    pub max_attempts: Option<u32>,
    /// Drop the stored code when delivery fails
    pub discard_on_delivery_failure: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            otp_length: DEFAULT_OTP_LENGTH,
            validity_seconds: DEFAULT_VALIDITY_SECONDS,
            default_method: DeliveryMethod::Email,
            max_attempts: Some(5),
            discard_on_delivery_failure: false,
        }
    }
}

impl OtpServiceConfig {
    /// Validate and convert the environment-level configuration
    pub fn from_config(config: &OtpConfig) -> DomainResult<Self> {
        config.validate()?;
        let default_method = config
            .delivery_method
            .parse::<DeliveryMethod>()
            .map_err(|message| DomainError::Validation { message })?;

        Ok(Self {
            otp_length: config.otp_length,
            validity_seconds: config.validity_seconds,
            default_method,
            max_attempts: (config.max_attempts > 0).then_some(config.max_attempts),
            discard_on_delivery_failure: config.discard_on_delivery_failure,
        })
    }
}

impl TryFrom<&OtpConfig> for OtpServiceConfig {
    type Error = DomainError;

    fn try_from(config: &OtpConfig) -> Result<Self, Self::Error> {
        Self::from_config(config)
    }
}
