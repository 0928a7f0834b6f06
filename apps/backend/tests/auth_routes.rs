//! Auth route validation that doesn't need a live database.

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend::state::{AppState, SecurityConfig};
use backend::test_support::create_test_app;
use backend_test_support::problem_details::assert_problem_details_from_parts;
use serde_json::json;

fn state() -> AppState {
    AppState::new_without_db(SecurityConfig::default())
}

async fn assert_problem(
    resp: actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
    expected_code: &str,
    expected_status: StatusCode,
    expected_detail_contains: Option<&str>,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = test::read_body(resp).await;
    assert_problem_details_from_parts(
        status,
        &headers,
        &body,
        expected_code,
        expected_status,
        expected_detail_contains,
    )
    .await;
}

#[actix_web::test]
async fn login_requires_email() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("email"),
    )
    .await;
}

#[actix_web::test]
async fn login_requires_password() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "someone@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("password"),
    )
    .await;
}

#[actix_web::test]
async fn register_rejects_unknown_role() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(json!({
            "name": "Jane Doe",
            "email": "jane@example.com",
            "password": "secret123",
            "role": "superuser"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "INVALID_ROLE",
        StatusCode::BAD_REQUEST,
        Some("superuser"),
    )
    .await;
}

#[actix_web::test]
async fn refresh_requires_a_token() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "VALIDATION_ERROR",
        StatusCode::BAD_REQUEST,
        Some("refresh_token"),
    )
    .await;
}

#[actix_web::test]
async fn login_without_db_reports_db_unavailable() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": "someone@example.com", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "DB_UNAVAILABLE",
        StatusCode::INTERNAL_SERVER_ERROR,
        None,
    )
    .await;
}
