//! Deployment stage and log output settings
//!
//! The stage decides whether mock delivery providers echo OTP messages to
//! the console and which log layout the server starts with.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

use super::env_or;

/// Stage the OTP server is deployed in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local work; mock providers print messages to stdout
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Whether mock email/SMS providers may print message bodies (and so
    /// codes) to stdout
    pub fn mock_console_output(&self) -> bool {
        matches!(self, Environment::Development)
    }

    /// Read the stage from `ENVIRONMENT`, then `ENV`, then `RUST_ENV`
    ///
    /// Unknown or missing values resolve to development.
    pub fn from_env() -> Self {
        ["ENVIRONMENT", "ENV", "RUST_ENV"]
            .iter()
            .find_map(|key| env::var(key).ok())
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        };
        f.write_str(name)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" | "test" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown deployment stage '{}'", other)),
        }
    }
}

/// Subscriber settings handed to `init_tracing`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Fallback filter directive, used only when `RUST_LOG` is unset
    pub level: String,

    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Stage defaults: development logs `debug` in pretty form, staging and
    /// production log `info` as JSON lines
    pub fn for_environment(env: Environment) -> Self {
        let (level, format) = match env {
            Environment::Development => ("debug", LogFormat::Pretty),
            Environment::Staging | Environment::Production => ("info", LogFormat::Json),
        };
        Self {
            level: level.to_string(),
            format,
        }
    }

    /// Stage defaults overridden by `LOG_LEVEL` and `LOG_FORMAT`
    pub fn from_env(env: Environment) -> Self {
        let defaults = Self::for_environment(env);
        Self {
            level: env_or("LOG_LEVEL", defaults.level),
            format: env_or("LOG_FORMAT", defaults.format),
        }
    }
}

/// Layout of emitted log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}
