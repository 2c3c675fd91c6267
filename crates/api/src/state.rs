//! Application state shared across handlers.

use std::sync::Arc;

use crate::interpreter::OrderInterpreter;
use crate::services::OrderingService;
use crate::store::OrderStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    ordering: OrderingService,
}

impl AppState {
    /// Create application state from a store and an interpreter.
    #[must_use]
    pub fn new(store: Arc<dyn OrderStore>, interpreter: Arc<dyn OrderInterpreter>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                ordering: OrderingService::new(store, interpreter),
            }),
        }
    }

    /// Get the ordering service.
    #[must_use]
    pub fn ordering(&self) -> &OrderingService {
        &self.inner.ordering
    }

    /// Get the order store.
    #[must_use]
    pub fn store(&self) -> &dyn OrderStore {
        self.inner.ordering.store()
    }
}
