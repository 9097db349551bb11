//! Shared application state for all routes.

use crate::store::ProductStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL in production; any other `ProductStore` can be injected for tests.
    pub store: Arc<dyn ProductStore>,
}

impl AppState {
    pub fn new(store: impl ProductStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
