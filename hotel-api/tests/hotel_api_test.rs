//! HTTP-level tests over the hotel service with in-memory repositories
//! and a recording event bus.

use axum_test::TestServer;
use chrono::{Duration, Utc};
use hotel_api::{
    mocks::{InMemoryAmenityRepository, InMemoryHotelRepository, RecordingEventBus},
    models::Amenity,
    routes::build_router,
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use stayhub_core::{HotelCreated, JwtConfig, HOTEL_CREATED_TOPIC};
use uuid::Uuid;

const SECRET: &str = "test-secret";

struct TestApp {
    server: TestServer,
    bus: Arc<RecordingEventBus>,
    amenities: Arc<InMemoryAmenityRepository>,
}

fn test_app() -> TestApp {
    let bus = Arc::new(RecordingEventBus::new());
    let amenities = Arc::new(InMemoryAmenityRepository::new());
    let state = AppState {
        hotels: Arc::new(InMemoryHotelRepository::new()),
        amenities: amenities.clone(),
        bus: bus.clone(),
        jwt: JwtConfig::new(SECRET),
    };
    TestApp {
        server: TestServer::new(build_router(state)).unwrap(),
        bus,
        amenities,
    }
}

fn admin_token() -> String {
    JwtConfig::new(SECRET)
        .issue(Uuid::new_v4(), "admin", Duration::hours(1))
        .unwrap()
}

fn user_token() -> String {
    JwtConfig::new(SECRET)
        .issue(Uuid::new_v4(), "user", Duration::hours(1))
        .unwrap()
}

fn hotel_body() -> Value {
    json!({
        "name": "Grand Plaza",
        "address": "1 Main St",
        "city": "Lisbon",
        "country": "Portugal",
        "amenities": [],
        "photos": ["https://example.com/front.jpg"]
    })
}

async fn seed_amenity(app: &TestApp, name: &str) {
    use hotel_api::repository::AmenityRepository;
    app.amenities
        .create(&Amenity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: Utc::now(),
        })
        .await
        .unwrap();
}

async fn create_hotel(app: &TestApp, body: &Value) -> Value {
    let response = app
        .server
        .post("/hotels")
        .authorization_bearer(admin_token())
        .json(body)
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json()
}

#[tokio::test]
async fn catalog_requires_authentication() {
    let app = test_app();
    let response = app.server.get("/hotels").await;
    response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn mutations_require_admin_role() {
    let app = test_app();
    let response = app
        .server
        .post("/hotels")
        .authorization_bearer(user_token())
        .json(&hotel_body())
        .await;
    response.assert_status(axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_hotel_publishes_event() {
    let app = test_app();
    let created = create_hotel(&app, &hotel_body()).await;

    let published = app.bus.published();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].0, HOTEL_CREATED_TOPIC);

    let payload: HotelCreated = published[0].1.decode().unwrap();
    assert_eq!(payload.id.to_string(), created["id"].as_str().unwrap());
    assert_eq!(payload.name, "Grand Plaza");
}

#[tokio::test]
async fn publish_failure_fails_the_request() {
    let app = test_app();
    app.bus.fail_next_publishes();

    let response = app
        .server
        .post("/hotels")
        .authorization_bearer(admin_token())
        .json(&hotel_body())
        .await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn duplicate_name_and_address_conflicts() {
    let app = test_app();
    create_hotel(&app, &hotel_body()).await;

    let response = app
        .server
        .post("/hotels")
        .authorization_bearer(admin_token())
        .json(&hotel_body())
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
}

// Two creates racing past the handler's duplicate pre-check end up at
// the storage layer's unique constraint; the loser must still surface
// as 409, not 500.
#[tokio::test]
async fn racing_duplicate_insert_maps_to_conflict() {
    use hotel_api::repository::{HotelRepository, StoreError};
    use stayhub_core::AppError;

    let hotels = InMemoryHotelRepository::new();
    let hotel = hotel_api::models::Hotel {
        id: Uuid::new_v4(),
        name: "Grand Plaza".to_string(),
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        amenities: vec![],
        photos: vec![],
        created_at: Utc::now(),
    };
    hotels.create(&hotel).await.unwrap();

    let racer = hotel_api::models::Hotel {
        id: Uuid::new_v4(),
        ..hotel
    };
    let err = hotels.create(&racer).await.unwrap_err();
    assert!(matches!(err, StoreError::Duplicate(_)));
    assert_eq!(
        AppError::from(err).status(),
        axum::http::StatusCode::CONFLICT
    );
}

#[tokio::test]
async fn same_name_different_address_is_allowed() {
    let app = test_app();
    create_hotel(&app, &hotel_body()).await;

    let mut other = hotel_body();
    other["address"] = json!("2 Side St");
    create_hotel(&app, &other).await;
}

#[tokio::test]
async fn unknown_amenities_are_named_in_the_error() {
    let app = test_app();
    seed_amenity(&app, "wifi").await;

    let mut body = hotel_body();
    body["amenities"] = json!(["wifi", "pool", "sauna"]);

    let response = app
        .server
        .post("/hotels")
        .authorization_bearer(admin_token())
        .json(&body)
        .await;
    response.assert_status(axum::http::StatusCode::UNPROCESSABLE_ENTITY);

    let error: Value = response.json();
    let message = error["message"].as_str().unwrap();
    assert!(message.contains("pool"));
    assert!(message.contains("sauna"));
    assert!(!message.contains("wifi"));
}

#[tokio::test]
async fn known_amenities_are_accepted() {
    let app = test_app();
    seed_amenity(&app, "wifi").await;

    let mut body = hotel_body();
    body["amenities"] = json!(["wifi"]);
    let created = create_hotel(&app, &body).await;
    assert_eq!(created["amenities"], json!(["wifi"]));
}

#[tokio::test]
async fn get_update_delete_lifecycle() {
    let app = test_app();
    let created = create_hotel(&app, &hotel_body()).await;
    let id = created["id"].as_str().unwrap();

    let fetched = app
        .server
        .get(&format!("/hotels/{id}"))
        .authorization_bearer(user_token())
        .await;
    fetched.assert_status_ok();

    let mut update = hotel_body();
    update["city"] = json!("Porto");
    let updated = app
        .server
        .put(&format!("/hotels/{id}"))
        .authorization_bearer(admin_token())
        .json(&update)
        .await;
    updated.assert_status_ok();
    let body: Value = updated.json();
    assert_eq!(body["city"], "Porto");

    let deleted = app
        .server
        .delete(&format!("/hotels/{id}"))
        .authorization_bearer(admin_token())
        .await;
    deleted.assert_status(axum::http::StatusCode::NO_CONTENT);

    let gone = app
        .server
        .get(&format!("/hotels/{id}"))
        .authorization_bearer(user_token())
        .await;
    gone.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_unknown_hotel_is_404() {
    let app = test_app();
    let response = app
        .server
        .put(&format!("/hotels/{}", Uuid::new_v4()))
        .authorization_bearer(admin_token())
        .json(&hotel_body())
        .await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_id_is_400() {
    let app = test_app();

    let fetched = app
        .server
        .get("/hotels/not-a-uuid")
        .authorization_bearer(user_token())
        .await;
    fetched.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let probed = app.server.get("/hotels/not-a-uuid/exists").await;
    probed.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exists_probe_is_unauthenticated() {
    let app = test_app();
    let created = create_hotel(&app, &hotel_body()).await;
    let id = created["id"].as_str().unwrap();

    let found = app.server.get(&format!("/hotels/{id}/exists")).await;
    found.assert_status_ok();
    let body: Value = found.json();
    assert_eq!(body["exists"], true);

    let missing = app
        .server
        .get(&format!("/hotels/{}/exists", Uuid::new_v4()))
        .await;
    missing.assert_status(axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn amenity_crud() {
    let app = test_app();

    let created = app
        .server
        .post("/amenities")
        .authorization_bearer(admin_token())
        .json(&json!({"name": "wifi"}))
        .await;
    created.assert_status(axum::http::StatusCode::CREATED);
    let amenity: Value = created.json();
    let id = amenity["id"].as_str().unwrap();

    let duplicate = app
        .server
        .post("/amenities")
        .authorization_bearer(admin_token())
        .json(&json!({"name": "wifi"}))
        .await;
    duplicate.assert_status(axum::http::StatusCode::CONFLICT);

    let renamed = app
        .server
        .put(&format!("/amenities/{id}"))
        .authorization_bearer(admin_token())
        .json(&json!({"name": "wireless"}))
        .await;
    renamed.assert_status_ok();

    let listed = app
        .server
        .get("/amenities")
        .authorization_bearer(user_token())
        .await;
    listed.assert_status_ok();
    let list: Value = listed.json();
    assert_eq!(list.as_array().unwrap().len(), 1);

    let deleted = app
        .server
        .delete(&format!("/amenities/{id}"))
        .authorization_bearer(admin_token())
        .await;
    deleted.assert_status(axum::http::StatusCode::NO_CONTENT);

    let gone = app
        .server
        .get(&format!("/amenities/{id}"))
        .authorization_bearer(user_token())
        .await;
    gone.assert_status(axum::http::StatusCode::NOT_FOUND);
}
