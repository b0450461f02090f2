//! HTTP clients for the synchronous existence checks.
//!
//! The original choreography is deliberately naive: before a reservation
//! is inserted, the user and hotel are probed with one GET each. A 404
//! means "does not exist"; anything other than 200/404 is an upstream
//! fault surfaced to the caller as 502. No retries.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Errors from an existence probe.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The upstream service could not be reached.
    #[error("Transport error calling {service}: {reason}")]
    Transport {
        /// Which service failed.
        service: String,
        /// Underlying error text.
        reason: String,
    },

    /// The upstream service answered with an unexpected status.
    #[error("{service} answered with unexpected status {status}")]
    UnexpectedStatus {
        /// Which service failed.
        service: String,
        /// The status received.
        status: u16,
    },
}

/// Existence probes against user-api and hotel-api.
#[async_trait]
pub trait ExistenceClient: Send + Sync {
    /// Whether the user id is known to user-api.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unexpected status.
    async fn user_exists(&self, id: Uuid) -> Result<bool, ClientError>;

    /// Whether the hotel id is known to hotel-api.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an unexpected status.
    async fn hotel_exists(&self, id: Uuid) -> Result<bool, ClientError>;
}

/// reqwest-backed [`ExistenceClient`].
#[derive(Clone)]
pub struct HttpExistenceClient {
    http: reqwest::Client,
    user_api_url: String,
    hotel_api_url: String,
}

impl HttpExistenceClient {
    /// Create a client over the two service base URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        user_api_url: impl Into<String>,
        hotel_api_url: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            http,
            user_api_url: user_api_url.into(),
            hotel_api_url: hotel_api_url.into(),
        })
    }

    async fn probe(&self, service: &str, url: String) -> Result<bool, ClientError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                service: service.to_string(),
                reason: e.to_string(),
            })?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(ClientError::UnexpectedStatus {
                service: service.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait]
impl ExistenceClient for HttpExistenceClient {
    async fn user_exists(&self, id: Uuid) -> Result<bool, ClientError> {
        let url = format!("{}/users/{id}/exists", self.user_api_url);
        self.probe("user-api", url).await
    }

    async fn hotel_exists(&self, id: Uuid) -> Result<bool, ClientError> {
        let url = format!("{}/hotels/{id}/exists", self.hotel_api_url);
        self.probe("hotel-api", url).await
    }
}
