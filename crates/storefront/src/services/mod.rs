//! Business logic services for storefront.
//!
//! # Services
//!
//! - `orders_api` - HTTP client for the orders backend
//! - `orders_page` - Per-request data loader for the orders landing page

pub mod orders_api;
pub mod orders_page;

pub use orders_api::{HttpOrdersApi, OrderRecord, OrdersApi, OrdersApiError};
pub use orders_page::{LoadError, LoadResult, OrdersPageLoader};
