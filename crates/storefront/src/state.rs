//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::services::{HttpOrdersApi, OrdersApi, OrdersApiError, OrdersPageLoader};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    orders_page: OrdersPageLoader,
}

impl AppState {
    /// Create application state that talks to the configured orders API.
    ///
    /// # Errors
    ///
    /// Returns an error if the orders API HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, OrdersApiError> {
        let api = HttpOrdersApi::new(&config.orders_api)?;
        Ok(Self::with_orders_api(config, Arc::new(api)))
    }

    /// Create application state around an existing orders source.
    #[must_use]
    pub fn with_orders_api(config: StorefrontConfig, api: Arc<dyn OrdersApi>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                orders_page: OrdersPageLoader::new(api),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the orders page loader.
    #[must_use]
    pub fn orders_page(&self) -> &OrdersPageLoader {
        &self.inner.orders_page
    }
}
