//! Application state for the HTTP server.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::store::DatasetStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Holder of the active field snapshot
    pub store: Arc<DatasetStore>,
    /// Thresholds, render sizes and generator settings
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state with an empty store.
    pub fn new(config: AppConfig) -> Self {
        Self {
            store: Arc::new(DatasetStore::new()),
            config: Arc::new(config),
        }
    }

    /// Share an existing store, e.g. one pre-populated at startup.
    pub fn with_store(store: Arc<DatasetStore>, config: AppConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
