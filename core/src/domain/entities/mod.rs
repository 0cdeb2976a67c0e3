//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{OtpRecord, DEFAULT_OTP_LENGTH, DEFAULT_VALIDITY_SECONDS};
