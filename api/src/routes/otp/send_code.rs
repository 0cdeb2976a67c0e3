use actix_web::{web, HttpResponse};
use sd_core::{IssueOutcome, OtpStore};
use sd_shared::utils::mask_identifier;
use sd_shared::ApiResponse;
use tracing_actix_web::RequestId;
use validator::Validate;

use super::validation_error_body;
use crate::app::AppState;
use crate::dto::{SendCodeRequest, SendCodeResponse};

/// Handler for POST /api/v1/otp/send
///
/// Issues a fresh code to `identifier` through `method`, or through the
/// configured default method when `method` is omitted.
///
/// Leading and trailing whitespace is trimmed from `identifier` before it
/// reaches the OTP service, so `" alice@example.com "` and
/// `"alice@example.com"` address the same challenge. An identifier that is
/// empty after trimming is rejected with 400.
///
/// # Request Body
///
/// ```json
/// {
///     "identifier": "alice@example.com",
///     "method": "email"
/// }
/// ```
///
/// # Response
///
/// - 200 with outcome `sent`
/// - 502 with outcome `delivery_failed`
/// - 400 with outcome `unsupported_method`, or for an empty identifier
pub async fn send_code<S: OtpStore + 'static>(
    request_id: RequestId,
    state: web::Data<AppState<S>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse {
    let request_id = request_id.to_string();
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(request_id = %request_id, "Rejected send_code request with invalid body");
        return HttpResponse::BadRequest().json(validation_error_body(&errors, request_id));
    }

    let identifier = request.identifier.trim();
    if identifier.is_empty() {
        return HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error("identifier is required").with_request_id(request_id));
    }

    tracing::info!(
        request_id = %request_id,
        identifier = %mask_identifier(identifier),
        method = request.method.as_deref().unwrap_or("default"),
        "Processing send_code request"
    );

    let outcome = match request.method.as_deref() {
        Some(method) => state.otp_service.issue_challenge(identifier, method).await,
        None => state.otp_service.issue_default_challenge(identifier).await,
    };

    let body = ApiResponse::success(SendCodeResponse::from(&outcome))
        .with_success(outcome.is_sent())
        .with_request_id(request_id);

    match outcome {
        IssueOutcome::Sent { .. } => HttpResponse::Ok().json(body),
        IssueOutcome::DeliveryFailed { .. } => HttpResponse::BadGateway().json(body),
        IssueOutcome::UnsupportedMethod { .. } => HttpResponse::BadRequest().json(body),
    }
}
