//! Static pages, the project showcase allow-list, and the store probe.

mod support;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;

use backend::server::build_app;
use support::{body_text, test_settings, DownStore, TestEnv};

#[actix_web::test]
async fn static_pages_render() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    for uri in ["/", "/home", "/intro", "/project", "/register", "/login", "/qa"] {
        let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
    }
}

#[actix_web::test]
async fn known_project_detail_renders() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/project/write-up").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("CTF write-ups"));
}

#[actix_web::test]
async fn project_detail_rejects_anything_off_the_catalogue() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    for uri in [
        "/project/unknown-entry",
        "/project/WRITE-UP",
        "/project/%2e%2e%2fsecrets",
    ] {
        let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri: {uri}");
    }
}

#[actix_web::test]
async fn unmatched_routes_get_the_error_page() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/no/such/page").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("404"));
    assert!(html.contains("Page not found"));
}

#[actix_web::test]
async fn store_probe_reports_success_as_plain_text() {
    let env = TestEnv::new();
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/check_db").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "database connection successful");
}

#[actix_web::test]
async fn store_probe_reports_the_failure_text() {
    let env = TestEnv::with_health(Arc::new(DownStore("no route to host")));
    let app = test::init_service(build_app(env.state.clone(), &test_settings())).await;

    let response =
        test::call_service(&app, test::TestRequest::get().uri("/check_db").to_request()).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let text = body_text(response).await;
    assert!(text.contains("database connection failed"));
    assert!(text.contains("no route to host"));
}
