//! Stayhub search service.
//!
//! Consumes `hotel.created` events and indexes them into a Solr-style
//! search engine, then answers prefix searches over the indexed hotels.
//! The index lags hotel-api by whatever the queue lags, so searches may
//! briefly miss hotels created moments ago.

pub mod config;
pub mod consumer;
pub mod handlers;
pub mod mocks;
pub mod routes;
pub mod solr;
pub mod state;
