//! OTP route handlers
//!
//! - Sending a code to an email address or phone number
//! - Checking a code the user typed back

pub mod send_code;
pub mod verify_code;

pub use send_code::send_code;
pub use verify_code::verify_code;

use sd_shared::ApiResponse;
use validator::ValidationErrors;

/// 400 body for a request that failed field validation
pub(crate) fn validation_error_body(errors: &ValidationErrors, request_id: String) -> ApiResponse<()> {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();
    ApiResponse::error(format!("Invalid request: check {}", fields.join(", ")))
        .with_request_id(request_id)
}
