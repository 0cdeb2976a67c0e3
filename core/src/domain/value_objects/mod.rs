//! Value objects: immutable types that describe delivery channels and
//! request outcomes.

pub mod delivery_method;
pub mod outcome;

pub use delivery_method::DeliveryMethod;
pub use outcome::{IssueOutcome, VerifyOutcome};
