//! HTTP tests for the OTP routes

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

use sd_api::{create_app, AppState};
use sd_core::services::otp::ManualClock;
use sd_core::{InMemoryOtpStore, NotifierRegistry, OtpService, OtpServiceConfig};
use sd_infra::email::MockEmailService;
use sd_infra::notifier::{EmailOtpNotifier, SmsOtpNotifier};
use sd_infra::sms::MockSmsService;

struct Fixture {
    state: web::Data<AppState<InMemoryOtpStore>>,
    email: MockEmailService,
    clock: Arc<ManualClock>,
}

fn fixture(sms_failing: bool) -> Fixture {
    let email = MockEmailService::new();
    let sms = MockSmsService::with_options(false, sms_failing);
    let registry = NotifierRegistry::new()
        .with(Arc::new(EmailOtpNotifier::new(
            Arc::new(email.clone()),
            "Your OTP Code",
            300,
        )))
        .with(Arc::new(SmsOtpNotifier::new(Arc::new(sms), 300)));

    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()));
    let config = OtpServiceConfig {
        max_attempts: Some(2),
        ..OtpServiceConfig::default()
    };
    let service = OtpService::new(
        Arc::new(InMemoryOtpStore::new()),
        registry,
        config,
    )
    .with_clock(clock.clone());

    Fixture {
        state: web::Data::new(AppState::new(Arc::new(service))),
        email,
        clock,
    }
}

fn last_email_code(email: &MockEmailService) -> String {
    email
        .last_message()
        .unwrap()
        .body
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(6)
        .collect()
}

#[actix_rt::test]
async fn test_send_then_verify() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "alice@example.com", "method": "email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["outcome"], "sent");
    assert_eq!(body["data"]["method"], "email");

    let code = last_email_code(&f.email);
    assert_eq!(code.len(), 6);

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "identifier": "alice@example.com", "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["outcome"], "verified");
    assert_eq!(body["data"]["verified"], true);

    // Single use
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "identifier": "alice@example.com", "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["outcome"], "no_such_challenge");
}

#[actix_rt::test]
async fn test_default_method_is_email() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "bob@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(f.email.get_message_count(), 1);
}

#[actix_rt::test]
async fn test_unsupported_method_is_bad_request() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "alice@example.com", "method": "carrier-pigeon" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"]["outcome"], "unsupported_method");
    assert_eq!(f.state.otp_service.outstanding_challenges(), 0);
}

#[actix_rt::test]
async fn test_delivery_failure_is_bad_gateway() {
    let f = fixture(true);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "+14155552671", "method": "sms" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["outcome"], "delivery_failed");
}

#[actix_rt::test]
async fn test_identifier_whitespace_is_trimmed_on_both_routes() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "  alice@example.com \n", "method": "email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(f.email.last_message().unwrap().to, "alice@example.com");

    let code = last_email_code(&f.email);
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "identifier": "alice@example.com ", "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["outcome"], "verified");
}

#[actix_rt::test]
async fn test_code_is_not_trimmed() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "alice@example.com" }))
        .to_request();
    test::call_service(&app, req).await;

    let code = format!(" {} ", last_email_code(&f.email));
    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "identifier": "alice@example.com", "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["outcome"], "mismatch");
}

#[actix_rt::test]
async fn test_empty_identifier_rejected() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    for identifier in ["", "   "] {
        let req = test::TestRequest::post()
            .uri("/api/v1/otp/send")
            .set_json(json!({ "identifier": identifier }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_rt::test]
async fn test_malformed_json_rejected() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"identifier\":")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_rt::test]
async fn test_mismatch_reports_remaining_attempts_then_locks_out() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "alice@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let code = last_email_code(&f.email);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let verify = |candidate: &str| {
        test::TestRequest::post()
            .uri("/api/v1/otp/verify")
            .set_json(json!({ "identifier": "alice@example.com", "code": candidate }))
            .to_request()
    };

    let resp = test::call_service(&app, verify(wrong)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["outcome"], "mismatch");
    assert_eq!(body["data"]["remaining_attempts"], 1);

    let body: Value = test::call_and_read_body_json(&app, verify(wrong)).await;
    assert_eq!(body["data"]["remaining_attempts"], 0);

    let body: Value = test::call_and_read_body_json(&app, verify(&code)).await;
    assert_eq!(body["data"]["outcome"], "no_such_challenge");
}

#[actix_rt::test]
async fn test_expired_code() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/send")
        .set_json(json!({ "identifier": "alice@example.com" }))
        .to_request();
    test::call_service(&app, req).await;
    let code = last_email_code(&f.email);

    f.clock.advance(Duration::seconds(301));

    let req = test::TestRequest::post()
        .uri("/api/v1/otp/verify")
        .set_json(json!({ "identifier": "alice@example.com", "code": code }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["outcome"], "expired");
}

#[actix_rt::test]
async fn test_health() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["outstanding_challenges"], 0);
}

#[actix_rt::test]
async fn test_unknown_route_is_not_found() {
    let f = fixture(false);
    let app = test::init_service(create_app(f.state.clone())).await;

    let req = test::TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
