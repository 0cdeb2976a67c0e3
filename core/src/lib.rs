//! # SupportDesk Core
//!
//! Domain layer for the SupportDesk backend. This crate owns the one-time
//! password (OTP) challenge: code generation, the identifier-keyed store with
//! expiry and single-use consumption, delivery through pluggable notifiers,
//! and the outcomes reported back to the conversational layer.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
