//! Tests over the search endpoint and the indexing consumer.

use axum_test::TestServer;
use search_api::{
    consumer,
    mocks::{InMemorySearchIndex, ReplayEventBus, UnreachableEventBus},
    routes::build_router,
    solr::SearchIndex,
    state::AppState,
};
use serde_json::{json, Value};
use std::sync::Arc;
use stayhub_core::{BusEvent, EventBusError, HotelCreated};
use uuid::Uuid;

fn hotel(name: &str) -> HotelCreated {
    HotelCreated {
        id: Uuid::new_v4(),
        name: name.to_string(),
        address: "1 Main St".to_string(),
        city: "Lisbon".to_string(),
        country: "Portugal".to_string(),
        amenities: vec!["wifi".to_string()],
    }
}

fn envelope(payload: &HotelCreated) -> BusEvent {
    BusEvent::encode(HotelCreated::EVENT_TYPE, payload).unwrap()
}

fn server_over(index: Arc<InMemorySearchIndex>) -> TestServer {
    TestServer::new(build_router(AppState { index })).unwrap()
}

#[tokio::test]
async fn search_requires_a_term() {
    let server = server_over(Arc::new(InMemorySearchIndex::new()));

    let missing = server.get("/search").await;
    missing.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let empty = server.get("/search").add_query_param("q", "  ").await;
    empty.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_returns_engine_results() {
    let index = Arc::new(InMemorySearchIndex::new());
    index.index(&hotel("Grand Plaza")).await.unwrap();
    index.index(&hotel("Grand Hotel")).await.unwrap();
    index.index(&hotel("Budget Inn")).await.unwrap();

    let server = server_over(index);
    let response = server.get("/search").add_query_param("q", "grand").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["response"]["numFound"], 2);
}

#[tokio::test]
async fn consumer_indexes_created_hotels() {
    let first = hotel("Grand Plaza");
    let second = hotel("Budget Inn");
    let bus = Arc::new(ReplayEventBus::new(vec![
        Ok(envelope(&first)),
        Ok(envelope(&second)),
    ]));
    let index = Arc::new(InMemorySearchIndex::new());

    consumer::run(bus, index.clone()).await.unwrap();

    let docs = index.documents();
    assert_eq!(docs.len(), 2);
    assert!(docs.iter().any(|d| d.id == first.id));
    assert!(docs.iter().any(|d| d.id == second.id));
}

#[tokio::test]
async fn consumer_reindexing_same_hotel_is_idempotent() {
    let created = hotel("Grand Plaza");
    let bus = Arc::new(ReplayEventBus::new(vec![
        Ok(envelope(&created)),
        Ok(envelope(&created)),
    ]));
    let index = Arc::new(InMemorySearchIndex::new());

    consumer::run(bus, index.clone()).await.unwrap();

    assert_eq!(index.documents().len(), 1);
}

#[tokio::test]
async fn consumer_skips_bad_events_and_keeps_going() {
    let good = hotel("Grand Plaza");
    let undecodable = BusEvent {
        event_type: HotelCreated::EVENT_TYPE.to_string(),
        payload: json!({"unexpected": true}),
        correlation_id: None,
    };
    let unrelated = BusEvent {
        event_type: "user.registered".to_string(),
        payload: json!({"id": Uuid::new_v4()}),
        correlation_id: None,
    };

    let bus = Arc::new(ReplayEventBus::new(vec![
        Ok(undecodable),
        Ok(unrelated),
        Err(EventBusError::TransportError("broker hiccup".to_string())),
        Ok(envelope(&good)),
    ]));
    let index = Arc::new(InMemorySearchIndex::new());

    consumer::run(bus, index.clone()).await.unwrap();

    let docs = index.documents();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, good.id);
}

#[tokio::test]
async fn consumer_fails_fast_when_subscription_fails() {
    let bus = Arc::new(UnreachableEventBus);
    let index = Arc::new(InMemorySearchIndex::new());

    let result = consumer::run(bus, index).await;
    assert!(matches!(
        result,
        Err(EventBusError::SubscriptionFailed { .. })
    ));
}

#[tokio::test]
async fn consumer_skips_indexing_failures() {
    let created = hotel("Grand Plaza");
    let bus = Arc::new(ReplayEventBus::new(vec![Ok(envelope(&created))]));
    let index = Arc::new(InMemorySearchIndex::new());
    index.fail_next_indexing();

    consumer::run(bus, index.clone()).await.unwrap();

    assert!(index.documents().is_empty());
}
