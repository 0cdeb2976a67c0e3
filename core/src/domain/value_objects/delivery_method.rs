//! Out-of-band channel a code is delivered through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported delivery channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    Email,
    Sms,
}

impl DeliveryMethod {
    /// Every supported method, in display order
    pub const ALL: [DeliveryMethod; 2] = [DeliveryMethod::Email, DeliveryMethod::Sms];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email",
            DeliveryMethod::Sms => "sms",
        }
    }

    /// How the destination is described to an end user
    pub fn destination_noun(&self) -> &'static str {
        match self {
            DeliveryMethod::Email => "email address",
            DeliveryMethod::Sms => "phone",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(DeliveryMethod::Email),
            "sms" => Ok(DeliveryMethod::Sms),
            _ => Err(format!("Unsupported delivery method: {}", s)),
        }
    }
}
