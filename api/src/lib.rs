//! HTTP surface of the SupportDesk OTP service
//!
//! Exposes the two operations the conversational agent calls (send a code,
//! check a code) plus a health probe.

pub mod app;
pub mod dto;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
