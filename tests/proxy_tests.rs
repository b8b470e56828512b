// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Proxy gateway tests.
//!
//! These tests verify that:
//! 1. Login forwarding validates fields and maps upstream statuses
//! 2. Authorized routes require the session token header
//! 3. The workout listing falls back exactly once on an upstream 404

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as mock_header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_login(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_liveness_probe() {
    let server = MockServer::start().await;
    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(Request::builder().uri("/api/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "Server is running!");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_login_requires_both_fields() {
    let server = MockServer::start().await;

    // A request with a missing field must never reach the upstream
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(post_login(json!({ "username": "rider@example.com" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_login_relays_successful_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(mock_header("peloton-platform", "ios"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "sess-1",
            "user_id": "user-1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(post_login(json!({
            "username": "  rider@example.com  ",
            "password": "pw"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["session_id"], "sess-1");
    assert_eq!(body["user_id"], "user-1");
}

#[tokio::test]
async fn test_login_maps_upstream_rejection_to_401() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid credentials"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(post_login(json!({ "username": "rider", "password": "bad" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_success_without_identity_fields_is_401() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "ok but no session"
        })))
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(post_login(json!({ "username": "rider", "password": "pw" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_relays_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": "maintenance"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(post_login(json!({ "username": "rider", "password": "pw" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 503);
}

#[tokio::test]
async fn test_workouts_require_session_header() {
    let server = MockServer::start().await;
    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user/user-1/workouts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "session_required");
}

#[tokio::test]
async fn test_workouts_relay_upstream_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workouts"))
        .and(query_param("limit", "25"))
        .and(query_param("page", "2"))
        .and(mock_header("cookie", "peloton_session_id=sess-1;"))
        .and(mock_header("peloton-platform", "web"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [common::workout_json("w1", "cycling", 100)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user/user-1/workouts?limit=25&page=2")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["id"], "w1");
}

#[tokio::test]
async fn test_workouts_fall_back_once_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workouts"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workout_history"))
        .and(query_param("joins", "ride,ride.instructor"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [common::workout_json("w1", "cycling", 100)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user/user-1/workouts")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"][0]["id"], "w1");
}

#[tokio::test]
async fn test_workouts_second_failure_lists_both_paths() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workouts"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workout_history"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "not found"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user/user-1/workouts")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    let paths = body["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].as_str().unwrap().contains("/workouts"));
    assert!(paths[1].as_str().unwrap().contains("/workout_history"));
}

#[tokio::test]
async fn test_workouts_non_404_error_is_relayed_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workouts"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/user/user-1/workout_history"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/user/user-1/workouts")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["statusCode"], 500);
}

#[tokio::test]
async fn test_performance_graph_forwards_with_default_stride() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workout/w1/performance_graph"))
        .and(query_param("every_n", "1000"))
        .and(mock_header("cookie", "peloton_session_id=sess-1;"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::performance_graph_json(11.2, 452.0)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/workout/w1/performance_graph")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["summaries"][1]["value"], 11.2);
}

#[tokio::test]
async fn test_performance_graph_failure_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/workout/w1/performance_graph"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "forbidden"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/workout/w1/performance_graph")
                .header("x-peloton-session", "sess-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to fetch performance data");
    assert_eq!(body["statusCode"], 403);
}
