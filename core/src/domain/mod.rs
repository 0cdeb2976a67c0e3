//! Domain layer containing entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::OtpRecord;
pub use value_objects::{DeliveryMethod, IssueOutcome, VerifyOutcome};
