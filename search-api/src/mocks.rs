//! In-memory search index and a replaying event bus for tests.

use crate::solr::{IndexError, SearchIndex};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use stayhub_core::{BusEvent, EventBus, EventBusError, EventStream, HotelCreated};
use uuid::Uuid;

/// In-memory [`SearchIndex`] keyed by hotel id.
#[derive(Default)]
pub struct InMemorySearchIndex {
    documents: Mutex<HashMap<Uuid, HotelCreated>>,
    fail_indexing: AtomicBool,
}

impl InMemorySearchIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent index calls fail.
    pub fn fail_next_indexing(&self) {
        self.fail_indexing.store(true, Ordering::SeqCst);
    }

    /// Snapshot of the indexed documents.
    #[must_use]
    pub fn documents(&self) -> Vec<HotelCreated> {
        self.documents
            .lock()
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index(&self, hotel: &HotelCreated) -> Result<(), IndexError> {
        if self.fail_indexing.load(Ordering::SeqCst) {
            return Err(IndexError::Transport("engine down".to_string()));
        }
        self.documents
            .lock()
            .map_err(|_| IndexError::Transport("Lock poisoned".to_string()))?
            .insert(hotel.id, hotel.clone());
        Ok(())
    }

    async fn search(&self, term: &str) -> Result<Value, IndexError> {
        let docs = self
            .documents
            .lock()
            .map_err(|_| IndexError::Transport("Lock poisoned".to_string()))?;

        let term = term.to_lowercase();
        let matches: Vec<Value> = docs
            .values()
            .filter(|h| h.name.to_lowercase().starts_with(&term))
            .map(|h| json!(h))
            .collect();

        Ok(json!({
            "response": {
                "numFound": matches.len(),
                "docs": matches,
            }
        }))
    }
}

/// Event bus whose subscriptions replay a fixed list of items.
pub struct ReplayEventBus {
    items: Mutex<Vec<Result<BusEvent, EventBusError>>>,
}

impl ReplayEventBus {
    /// Create a bus that will replay the given items, in order.
    #[must_use]
    pub fn new(items: Vec<Result<BusEvent, EventBusError>>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

/// Event bus whose subscriptions always fail, as when the broker is
/// unreachable at startup.
pub struct UnreachableEventBus;

impl EventBus for UnreachableEventBus {
    fn publish(
        &self,
        topic: &str,
        _event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>> {
        let topic = topic.to_string();
        Box::pin(async move {
            Err(EventBusError::PublishFailed {
                topic,
                reason: "broker unreachable".to_string(),
            })
        })
    }

    fn subscribe(
        &self,
        topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>> {
        let topics: Vec<String> = topics.iter().map(ToString::to_string).collect();
        Box::pin(async move {
            Err(EventBusError::SubscriptionFailed {
                topics,
                reason: "broker unreachable".to_string(),
            })
        })
    }
}

impl EventBus for ReplayEventBus {
    fn publish(
        &self,
        topic: &str,
        _event: &BusEvent,
    ) -> Pin<Box<dyn Future<Output = Result<(), EventBusError>> + Send + '_>> {
        let topic = topic.to_string();
        Box::pin(async move {
            Err(EventBusError::PublishFailed {
                topic,
                reason: "replay bus does not publish".to_string(),
            })
        })
    }

    fn subscribe(
        &self,
        _topics: &[&str],
    ) -> Pin<Box<dyn Future<Output = Result<EventStream, EventBusError>> + Send + '_>> {
        Box::pin(async move {
            let items = self
                .items
                .lock()
                .map(|mut items| std::mem::take(&mut *items))
                .unwrap_or_default();
            Ok(Box::pin(futures::stream::iter(items)) as EventStream)
        })
    }
}
