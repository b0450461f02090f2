//! Search engine client.
//!
//! Talks the Solr HTTP API: documents go in through
//! `POST {base}/update?commit=true` with an `{"add": {"doc": ...}}` body,
//! queries go out through `GET {base}/select`. The engine's JSON response
//! is passed back to clients untouched.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use stayhub_core::HotelCreated;
use thiserror::Error;

/// Errors from the search engine.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The engine could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The engine answered with a non-success status.
    #[error("Search engine answered with status {0}")]
    EngineStatus(u16),
}

/// Indexing and querying over hotel documents.
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Index (or re-index) one hotel document.
    ///
    /// The document id is the hotel id, so indexing the same event twice
    /// overwrites rather than duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the engine rejects the document.
    async fn index(&self, hotel: &HotelCreated) -> Result<(), IndexError>;

    /// Prefix search over indexed hotels; returns the engine's raw JSON.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the query cannot be completed.
    async fn search(&self, term: &str) -> Result<Value, IndexError>;
}

/// reqwest-backed Solr client.
#[derive(Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    base_url: String,
}

impl SolrClient {
    /// Create a client over the core's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl SearchIndex for SolrClient {
    async fn index(&self, hotel: &HotelCreated) -> Result<(), IndexError> {
        let url = format!("{}/update?commit=true", self.base_url);
        let body = json!({ "add": { "doc": hotel } });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(IndexError::EngineStatus(response.status().as_u16()))
        }
    }

    async fn search(&self, term: &str) -> Result<Value, IndexError> {
        let url = format!("{}/select", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[("q", format!("{term}*")), ("wt", "json".to_string())])
            .send()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(IndexError::EngineStatus(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| IndexError::Transport(e.to_string()))
    }
}
