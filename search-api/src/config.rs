//! Configuration for the search service.

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Message queue configuration
    pub queue: QueueConfig,
    /// Search engine configuration
    pub solr: SolrConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// Message queue configuration
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Broker list, comma-separated host:port pairs
    pub brokers: String,
    /// Consumer group; instances sharing it split the workload
    pub consumer_group: String,
}

/// Search engine configuration
#[derive(Debug, Clone)]
pub struct SolrConfig {
    /// Core base URL, e.g. `http://localhost:8983/solr/hotels`
    pub base_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3003),
            },
            queue: QueueConfig {
                brokers: env::var("KAFKA_BROKERS").unwrap_or_else(|_| "localhost:9092".to_string()),
                consumer_group: env::var("CONSUMER_GROUP")
                    .unwrap_or_else(|_| "search-indexer".to_string()),
            },
            solr: SolrConfig {
                base_url: env::var("SOLR_URL")
                    .unwrap_or_else(|_| "http://localhost:8983/solr/hotels".to_string()),
            },
        }
    }
}
