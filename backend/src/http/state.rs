//! Application state for the HTTP server.

use std::sync::Arc;

use crate::services::dashboard::ViewController;
use crate::store::SnapshotStore;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Installed dataset snapshot
    pub store: Arc<SnapshotStore>,
    /// Default/Filtered view state of the page
    pub controller: Arc<ViewController>,
}

impl AppState {
    /// Create a new application state around the given store.
    pub fn new(store: Arc<SnapshotStore>) -> Self {
        Self {
            store,
            controller: Arc::new(ViewController::new()),
        }
    }
}
