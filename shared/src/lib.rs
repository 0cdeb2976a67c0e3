//! Shared utilities and common types for the SupportDesk server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - Identifier masking and format helpers
//! - API response envelope

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, ConfigError, DeliveryConfig, EmailProvider, Environment, LogFormat,
    LoggingConfig, OtpConfig, ServerConfig, SmsConfig, SmtpConfig,
};
pub use types::{ApiResponse, HealthResponse};
pub use utils::{email, mask, phone};
