//! One-time password challenge module
//!
//! This module provides the complete OTP workflow:
//! - Uniform random numeric code generation
//! - Identifier-keyed store with expiry, single use and an attempt cap
//! - Delivery through pluggable notifiers (email, SMS)
//! - Verification producing user-facing outcomes
//! - Periodic sweeping of expired challenges

mod clock;
mod config;
mod generator;
mod notifier;
mod service;
mod store;
mod sweeper;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OtpServiceConfig;
pub use generator::{generate_code, generate_code_with};
pub use notifier::{NotifierRegistry, OtpNotifier};
pub use service::OtpService;
pub use store::{InMemoryOtpStore, OtpStore};
pub use sweeper::ExpiredOtpSweeper;
