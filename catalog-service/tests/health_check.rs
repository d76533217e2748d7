mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use common::TestApp;
use tower::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "catalog-service");
}

#[tokio::test]
async fn readiness_check_works() {
    let app = TestApp::spawn();

    let (status, _) = app.get("/ready").await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_request_id() {
    let app = TestApp::spawn();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::spawn();

    let (status, body) = app.get("/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 404);
    assert_eq!(body["message"], "resource not found");
}

#[tokio::test]
async fn unsupported_method_gets_json_error() {
    let app = TestApp::spawn();

    let (status, body) = app.send(Method::PUT, "/questions", None, None).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 405);
    assert_eq!(body["message"], "method not allowed");
}

#[tokio::test]
async fn malformed_path_id_is_bad_request() {
    let app = TestApp::spawn();

    let (status, body) = app.delete("/questions/abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], 400);
}

#[tokio::test]
async fn metrics_are_exposed_as_text() {
    service_core::observability::init_metrics();
    let app = TestApp::spawn();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()["content-type"]
        .to_str()
        .unwrap()
        .starts_with("text/plain"));
}
