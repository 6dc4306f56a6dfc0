//! Application state.

use std::sync::Arc;

use forkful_store::Storage;

use crate::config::ServiceConfig;

/// Application state shared across handlers.
///
/// Handlers depend on the storage contract, never on a concrete backend, so
/// the same router serves the in-memory and the `PostgreSQL` deployments.
#[derive(Clone)]
pub struct AppState {
    /// The storage backend.
    pub storage: Arc<dyn Storage>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>, config: ServiceConfig) -> Self {
        Self { storage, config }
    }
}
