//! Common utility functions

pub mod email;
pub mod mask;
pub mod phone;

// Re-export commonly used utilities
pub use email::is_valid_email;
pub use mask::mask_identifier;
pub use phone::{is_valid_international_phone, normalize_phone_number};
