//! Application state and factory
//!
//! This module holds the shared state and builds the Actix-web application.

use std::sync::Arc;

use actix_web::{error, web, App, HttpResponse};
use sd_core::{OtpService, OtpStore};
use sd_shared::ApiResponse;
use tracing_actix_web::TracingLogger;

use crate::routes::{health::health_check, otp};

/// Application state that holds shared services
pub struct AppState<S: OtpStore> {
    pub otp_service: Arc<OtpService<S>>,
}

impl<S: OtpStore> AppState<S> {
    pub fn new(otp_service: Arc<OtpService<S>>) -> Self {
        Self { otp_service }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<S: OtpStore + 'static>(
    app_state: web::Data<AppState<S>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(json_config())
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check::<S>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/otp")
                        .route("/send", web::post().to(otp::send_code::<S>))
                        .route("/verify", web::post().to(otp::verify_code::<S>)),
                )
                .route("/", web::get().to(api_documentation)),
        )
        .default_service(web::route().to(not_found))
}

/// Malformed JSON bodies get the same envelope as validation failures
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(4096)
        .error_handler(|err, _req| {
            let body = ApiResponse::<()>::error(format!("Invalid request body: {}", err));
            error::InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        })
}

/// API documentation endpoint
async fn api_documentation() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SupportDesk API v1",
        "endpoints": {
            "health": "/health",
            "otp": {
                "send": {
                    "path": "/api/v1/otp/send",
                    "method": "POST",
                    "description": "Send a one-time code by email or SMS",
                    "request_body": {
                        "identifier": "string (email address or E.164 phone number)",
                        "method": "string ('email' or 'sms', optional)"
                    },
                    "responses": {
                        "200": "Code sent",
                        "400": "Unsupported method or invalid body",
                        "502": "Delivery provider failed"
                    }
                },
                "verify": {
                    "path": "/api/v1/otp/verify",
                    "method": "POST",
                    "description": "Check a one-time code",
                    "request_body": {
                        "identifier": "string",
                        "code": "string"
                    },
                    "responses": {
                        "200": "Outcome: verified, no_such_challenge, expired or mismatch",
                        "400": "Invalid body"
                    }
                }
            }
        }
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error("The requested resource was not found"))
}
