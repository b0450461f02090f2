//! HTTP-level tests over the reservation service with in-memory storage
//! and scripted existence probes.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use reservation_api::{
    mocks::{InMemoryReservationRepository, ProbeAnswer, StubExistenceClient},
    routes::build_router,
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use stayhub_core::JwtConfig;
use uuid::Uuid;

const SECRET: &str = "test-secret";

fn server_with(existence: StubExistenceClient) -> TestServer {
    let state = AppState {
        reservations: Arc::new(InMemoryReservationRepository::new()),
        existence: Arc::new(existence),
        jwt: JwtConfig::new(SECRET),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn token_for(user_id: Uuid) -> String {
    JwtConfig::new(SECRET)
        .issue(user_id, "user", Duration::hours(1))
        .unwrap()
}

fn booking_body() -> Value {
    let from = Utc::now() + Duration::days(7);
    let to = from + Duration::days(3);
    json!({
        "hotel_id": Uuid::new_v4(),
        "from_date": from,
        "to_date": to,
    })
}

#[tokio::test]
async fn create_requires_authentication() {
    let server = server_with(StubExistenceClient::all_exist());
    let response = server.post("/reservations").json(&booking_body()).await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn user_id_comes_from_the_token() {
    let server = server_with(StubExistenceClient::all_exist());
    let user_id = Uuid::new_v4();

    let response = server
        .post("/reservations")
        .authorization_bearer(token_for(user_id))
        .json(&booking_body())
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user_id"], user_id.to_string());
}

#[tokio::test]
async fn dates_must_be_ordered() {
    let server = server_with(StubExistenceClient::all_exist());
    let from = Utc::now();

    let response = server
        .post("/reservations")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&json!({
            "hotel_id": Uuid::new_v4(),
            "from_date": from,
            "to_date": from - Duration::days(1),
        }))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_user_is_422() {
    let server = server_with(StubExistenceClient {
        users: ProbeAnswer::Missing,
        hotels: ProbeAnswer::Exists,
    });

    let response = server
        .post("/reservations")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&booking_body())
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["message"], "User does not exist");
}

#[tokio::test]
async fn missing_hotel_is_422() {
    let server = server_with(StubExistenceClient {
        users: ProbeAnswer::Exists,
        hotels: ProbeAnswer::Missing,
    });

    let response = server
        .post("/reservations")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&booking_body())
        .await;

    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["message"], "Hotel does not exist");
}

#[tokio::test]
async fn unreachable_upstream_is_502() {
    let server = server_with(StubExistenceClient {
        users: ProbeAnswer::Broken,
        hotels: ProbeAnswer::Exists,
    });

    let response = server
        .post("/reservations")
        .authorization_bearer(token_for(Uuid::new_v4()))
        .json(&booking_body())
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn list_and_list_for_user() {
    let server = server_with(StubExistenceClient::all_exist());
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    for user in [alice, alice, bob] {
        server
            .post("/reservations")
            .authorization_bearer(token_for(user))
            .json(&booking_body())
            .await
            .assert_status(axum::http::StatusCode::CREATED);
    }

    let all = server
        .get("/reservations")
        .authorization_bearer(token_for(alice))
        .await;
    all.assert_status_ok();
    let body: Value = all.json();
    assert_eq!(body.as_array().unwrap().len(), 3);

    let alices = server
        .get(&format!("/reservations/user/{alice}"))
        .authorization_bearer(token_for(alice))
        .await;
    alices.assert_status_ok();
    let body: Value = alices.json();
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_reservation() {
    let server = server_with(StubExistenceClient::all_exist());
    let user = Uuid::new_v4();

    let created = server
        .post("/reservations")
        .authorization_bearer(token_for(user))
        .json(&booking_body())
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = created.json();
    let id = body["id"].as_str().unwrap();

    let deleted = server
        .delete(&format!("/reservations/{id}"))
        .authorization_bearer(token_for(user))
        .await;
    deleted.assert_status(axum::http::StatusCode::NO_CONTENT);

    let again = server
        .delete(&format!("/reservations/{id}"))
        .authorization_bearer(token_for(user))
        .await;
    again.assert_status(axum::http::StatusCode::NOT_FOUND);
}
