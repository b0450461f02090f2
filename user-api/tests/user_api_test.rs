//! HTTP-level tests over the user service with an in-memory repository.

use axum_test::TestServer;
use chrono::Duration;
use serde_json::{json, Value};
use std::sync::Arc;
use stayhub_core::JwtConfig;
use user_api::{mocks::InMemoryUserRepository, routes::build_router, state::AppState};

fn test_server() -> TestServer {
    let state = AppState {
        users: Arc::new(InMemoryUserRepository::new()),
        jwt: JwtConfig::new("test-secret"),
        token_ttl: Duration::hours(1),
    };
    TestServer::new(build_router(state)).unwrap()
}

async fn register(server: &TestServer, email: &str, password: &str) -> Value {
    let response = server
        .post("/users/register")
        .json(&json!({"email": email, "password": password}))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn register_returns_201_with_id() {
    let server = test_server();
    let body = register(&server, "alice@example.com", "password123").await;

    assert!(body["id"].as_str().is_some());
    assert_eq!(body["message"], "User registered");
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let server = test_server();
    let response = server
        .post("/users/register")
        .json(&json!({"email": "not-an-email", "password": "password123"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_short_password() {
    let server = test_server();
    let response = server
        .post("/users/register")
        .json(&json!({"email": "alice@example.com", "password": "short"}))
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let server = test_server();
    register(&server, "alice@example.com", "password123").await;

    let response = server
        .post("/users/register")
        .json(&json!({"email": "alice@example.com", "password": "password456"}))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_returns_token_and_cookie() {
    let server = test_server();
    register(&server, "alice@example.com", "password123").await;

    let response = server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": "password123"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert!(body["user"].get("password_hash").is_none());

    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("Authorization="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let server = test_server();
    register(&server, "alice@example.com", "password123").await;

    let wrong_password = server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": "wrongwrong"}))
        .await;
    wrong_password.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let unknown_email = server
        .post("/users/login")
        .json(&json!({"email": "nobody@example.com", "password": "password123"}))
        .await;
    unknown_email.assert_status(axum::http::StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json();
    let b: Value = unknown_email.json();
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
async fn me_returns_current_user() {
    let server = test_server();
    register(&server, "alice@example.com", "password123").await;

    let login: Value = server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": "password123"}))
        .await
        .json();
    let token = login["token"].as_str().unwrap();

    let response = server
        .get("/users/me")
        .authorization_bearer(token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn me_requires_authentication() {
    let server = test_server();
    let response = server.get("/users/me").await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn validate_echoes_claims() {
    let server = test_server();
    let registered = register(&server, "alice@example.com", "password123").await;
    let user_id = registered["id"].as_str().unwrap();

    let login: Value = server
        .post("/users/login")
        .json(&json!({"email": "alice@example.com", "password": "password123"}))
        .await
        .json();
    let token = login["token"].as_str().unwrap();

    let response = server
        .get("/users/validate")
        .authorization_bearer(token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user_id"], user_id);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn validate_rejects_garbage_token() {
    let server = test_server();
    let response = server
        .get("/users/validate")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn exists_probe() {
    let server = test_server();
    let registered = register(&server, "alice@example.com", "password123").await;
    let user_id = registered["id"].as_str().unwrap();

    let found = server.get(&format!("/users/{user_id}/exists")).await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_eq!(body["exists"], true);

    let missing = server
        .get(&format!("/users/{}/exists", uuid::Uuid::new_v4()))
        .await;
    missing.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn logout_clears_cookie() {
    let server = test_server();
    let response = server.post("/users/logout").await;

    response.assert_status_ok();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("Authorization=;"));
    assert!(cookie.contains("Max-Age=0"));
}
