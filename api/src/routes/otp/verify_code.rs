use actix_web::{web, HttpResponse};
use sd_core::OtpStore;
use sd_shared::utils::mask_identifier;
use sd_shared::ApiResponse;
use tracing_actix_web::RequestId;
use validator::Validate;

use super::validation_error_body;
use crate::app::AppState;
use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};

/// Handler for POST /api/v1/otp/verify
///
/// Every verification outcome is a 200: the outcome tag and message tell the
/// caller what to say next. Only a malformed body is a 400.
///
/// `identifier` is trimmed the same way as on the send route; an identifier
/// that is empty after trimming is a 400. `code` is compared exactly as
/// received, without trimming.
///
/// # Request Body
///
/// ```json
/// {
///     "identifier": "alice@example.com",
///     "code": "042917"
/// }
/// ```
pub async fn verify_code<S: OtpStore + 'static>(
    request_id: RequestId,
    state: web::Data<AppState<S>>,
    request: web::Json<VerifyCodeRequest>,
) -> HttpResponse {
    let request_id = request_id.to_string();
    let request = request.into_inner();

    if let Err(errors) = request.validate() {
        tracing::warn!(request_id = %request_id, "Rejected verify_code request with invalid body");
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
        "Processing verify_code request"
    );

    let outcome = state.otp_service.verify_challenge(identifier, &request.code);

    HttpResponse::Ok().json(
        ApiResponse::success(VerifyCodeResponse::from(&outcome)).with_request_id(request_id),
    )
}
