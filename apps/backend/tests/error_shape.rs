//! The API's stable error contract: RFC 7807 bodies with matching
//! x-trace-id headers.

use std::time::SystemTime;

use actix_web::http::StatusCode;
use actix_web::{test, web};
use backend::entities::UserRole;
use backend::state::{AppState, SecurityConfig};
use backend::test_support::create_test_app;
use backend::mint_token_pair;
use backend_test_support::problem_details::assert_problem_details_from_parts;

const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

fn state() -> AppState {
    AppState::new_without_db(SecurityConfig::new(TEST_SECRET))
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
async fn missing_bearer_is_401_with_trace_id() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::get().uri("/api/v1/me").to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "UNAUTHORIZED_MISSING_BEARER",
        StatusCode::UNAUTHORIZED,
        Some("Bearer"),
    )
    .await;
}

#[actix_web::test]
async fn garbage_token_is_401_invalid_jwt() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "UNAUTHORIZED_INVALID_JWT",
        StatusCode::UNAUTHORIZED,
        None,
    )
    .await;
}

#[actix_web::test]
async fn customer_role_cannot_manage_customers() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let security = SecurityConfig::new(TEST_SECRET);
    let pair = mint_token_pair(
        7,
        "customer@example.com",
        UserRole::Customer,
        SystemTime::now(),
        &security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/customers")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "INSUFFICIENT_ROLE",
        StatusCode::FORBIDDEN,
        Some("insufficient role"),
    )
    .await;
}

#[actix_web::test]
async fn technician_cannot_manage_users() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let security = SecurityConfig::new(TEST_SECRET);
    let pair = mint_token_pair(
        3,
        "technician@example.com",
        UserRole::Technician,
        SystemTime::now(),
        &security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/users")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, "INSUFFICIENT_ROLE", StatusCode::FORBIDDEN, None).await;
}

#[actix_web::test]
async fn refresh_token_is_rejected_on_api_routes() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let security = SecurityConfig::new(TEST_SECRET);
    let pair = mint_token_pair(
        1,
        "admin@example.com",
        UserRole::Admin,
        SystemTime::now(),
        &security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(("Authorization", format!("Bearer {}", pair.refresh_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(
        resp,
        "WRONG_TOKEN_TYPE",
        StatusCode::BAD_REQUEST,
        Some("access"),
    )
    .await;
}

#[actix_web::test]
async fn invalid_user_id_is_400_before_touching_the_db() {
    backend_test_support::logging::init();
    let app = create_test_app(web::Data::new(state())).await;

    let security = SecurityConfig::new(TEST_SECRET);
    let pair = mint_token_pair(
        1,
        "admin@example.com",
        UserRole::Admin,
        SystemTime::now(),
        &security,
    )
    .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/users/not-a-number")
        .insert_header(("Authorization", format!("Bearer {}", pair.access_token)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_problem(resp, "INVALID_ID", StatusCode::BAD_REQUEST, Some("user ID")).await;
}
