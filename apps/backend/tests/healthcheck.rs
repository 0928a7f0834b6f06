use actix_web::{test, web};
use backend::state::{AppState, SecurityConfig};
use backend::test_support::create_test_app;
use serde_json::Value;

#[actix_web::test]
async fn health_reports_degraded_db_without_connection() {
    backend_test_support::logging::init();

    let app_state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(web::Data::new(app_state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["db"], "error");
    assert_eq!(body["migrations"], "unknown");
    assert!(body["db_error"].as_str().unwrap().contains("DB unavailable"));
    assert!(body["app_version"].as_str().is_some());
}

#[actix_web::test]
async fn root_greets() {
    backend_test_support::logging::init();

    let app_state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(web::Data::new(app_state)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert!(resp.status().is_success());
    let body = test::read_body(resp).await;
    assert_eq!(body, "Dashboard AC backend");
}

#[actix_web::test]
async fn responses_carry_request_id_header() {
    backend_test_support::logging::init();

    let app_state = AppState::new_without_db(SecurityConfig::default());
    let app = create_test_app(web::Data::new(app_state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    let request_id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header should be present")
        .to_str()
        .unwrap();
    // uuid v4 string
    assert_eq!(request_id.len(), 36);
}
