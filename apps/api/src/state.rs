use std::sync::Arc;

use crate::config::Config;
use crate::storage::KeyValueStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable key-value store. Redis when `REDIS_URL` is set, memory otherwise.
    pub store: Arc<dyn KeyValueStore>,
    pub config: Config,
}
