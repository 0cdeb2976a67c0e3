use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use sd_api::{create_app, telemetry, AppState};
use sd_core::{ExpiredOtpSweeper, InMemoryOtpStore, OtpService, OtpServiceConfig};
use sd_infra::build_notifier_registry;
use sd_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting SupportDesk API Server");

    config.validate().context("invalid configuration")?;
    let otp_config = OtpServiceConfig::from_config(&config.otp).context("invalid OTP configuration")?;

    let store = Arc::new(InMemoryOtpStore::new());
    let registry = build_notifier_registry(&config);
    let otp_service = Arc::new(OtpService::new(store, registry, otp_config));

    info!(
        otp_length = otp_service.config().otp_length,
        validity_seconds = otp_service.config().validity_seconds,
        default_method = %otp_service.config().default_method,
        max_attempts = ?otp_service.config().max_attempts,
        "OTP service ready"
    );

    let sweeper = ExpiredOtpSweeper::from_secs(otp_service.clone(), config.otp.sweep_interval_seconds)
        .map(ExpiredOtpSweeper::spawn);

    let app_state = web::Data::new(AppState::new(otp_service));
    let bind_address = config.server.bind_address();
    info!(bind_address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(app_state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server error");

    if let Some(handle) = sweeper {
        handle.abort();
    }
    result
}
