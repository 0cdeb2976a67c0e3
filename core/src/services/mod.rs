//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    Clock, ExpiredOtpSweeper, InMemoryOtpStore, NotifierRegistry, OtpNotifier, OtpService,
    OtpServiceConfig, OtpStore, SystemClock,
};
