//! Shared application state.

use crate::solr::SearchIndex;
use std::sync::Arc;

/// State shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Search engine client.
    pub index: Arc<dyn SearchIndex>,
}
