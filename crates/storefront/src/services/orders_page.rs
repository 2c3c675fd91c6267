//! Data loader for the orders landing page.
//!
//! Runs once per page request. Signed-out visitors get an empty page without
//! touching the network; signed-in users get their orders from the orders API.
//!
//! ```text
//! session ──► user id? ──no──► { userId: null, initialOrders: [] }
//!                │
//!               yes
//!                ▼
//!        GET /orders/<user id> ──► { userId, initialOrders: <body> }
//! ```

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use drive_thru_core::UserId;

use super::orders_api::{OrderRecord, OrdersApi, OrdersApiError};
use crate::error::set_sentry_user;
use crate::models::CurrentSession;

/// Failure to produce page data for a signed-in user.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The orders API could not be reached, refused the request, or sent
    /// something other than a list of orders.
    #[error("failed to load orders: {0}")]
    OrdersApi(#[from] OrdersApiError),
}

/// Data handed to the orders page.
///
/// Serialized as `{ "userId": string | null, "initialOrders": [...] }`.
/// Orders are only ever present alongside a user id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResult {
    user_id: Option<UserId>,
    initial_orders: Vec<OrderRecord>,
}

impl LoadResult {
    /// Page data for a visitor who is not signed in.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            user_id: None,
            initial_orders: Vec::new(),
        }
    }

    /// Page data for a signed-in user and their orders.
    #[must_use]
    pub const fn for_user(user_id: UserId, orders: Vec<OrderRecord>) -> Self {
        Self {
            user_id: Some(user_id),
            initial_orders: orders,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    /// Orders to render on first paint.
    #[must_use]
    pub fn initial_orders(&self) -> &[OrderRecord] {
        &self.initial_orders
    }
}

/// Loads the orders landing page.
#[derive(Clone)]
pub struct OrdersPageLoader {
    api: Arc<dyn OrdersApi>,
}

impl OrdersPageLoader {
    /// Create a loader that fetches orders from `api`.
    #[must_use]
    pub fn new(api: Arc<dyn OrdersApi>) -> Self {
        Self { api }
    }

    /// Produce the page data for one request.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the user is signed in and their orders cannot
    /// be fetched. Signed-out requests never fail.
    #[instrument(skip_all, fields(user_id = tracing::field::Empty))]
    pub async fn load(&self, session: Option<&CurrentSession>) -> Result<LoadResult, LoadError> {
        let Some(user_id) = session.and_then(CurrentSession::user_id) else {
            return Ok(LoadResult::anonymous());
        };
        tracing::Span::current().record("user_id", user_id.as_str());
        set_sentry_user(&user_id);

        let orders = self.api.fetch_orders(&user_id).await?;
        tracing::debug!(count = orders.len(), "Loaded orders for page");

        Ok(LoadResult::for_user(user_id, orders))
    }
}
