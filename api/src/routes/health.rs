use actix_web::{web, HttpResponse};
use sd_core::OtpStore;
use sd_shared::HealthResponse;

use crate::app::AppState;

/// Handler for GET /health
pub async fn health_check<S: OtpStore + 'static>(state: web::Data<AppState<S>>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "supportdesk-api".to_string(),
        outstanding_challenges: state.otp_service.outstanding_challenges(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
