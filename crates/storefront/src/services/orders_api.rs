//! Orders API client.
//!
//! Fetches a user's orders from the orders backend:
//!
//! ```text
//! GET <base_url>/orders/<user_id>
//! ```
//!
//! The response body must be a JSON array. Its elements are not inspected;
//! they are handed to the page as-is.

use async_trait::async_trait;
use drive_thru_core::UserId;
use tracing::instrument;

use crate::config::OrdersApiConfig;

/// One order as returned by the backend, passed through untouched.
pub type OrderRecord = serde_json::Value;

/// Errors that can occur when fetching orders.
#[derive(Debug, thiserror::Error)]
pub enum OrdersApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not a JSON array.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of a user's orders.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    /// Fetch every order belonging to `user_id`, in backend order.
    async fn fetch_orders(&self, user_id: &UserId) -> Result<Vec<OrderRecord>, OrdersApiError>;
}

/// [`OrdersApi`] backed by the orders HTTP service.
#[derive(Clone)]
pub struct HttpOrdersApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpOrdersApi {
    /// Create a client for the API described by `config`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &OrdersApiConfig) -> Result<Self, OrdersApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url().to_string(),
        })
    }

    /// URL of the orders endpoint for `user_id`.
    ///
    /// The id is percent-encoded so it always lands in a single path segment.
    #[must_use]
    pub fn orders_url(&self, user_id: &UserId) -> String {
        format!(
            "{}/orders/{}",
            self.base_url,
            urlencoding::encode(user_id.as_str())
        )
    }
}

#[async_trait]
impl OrdersApi for HttpOrdersApi {
    #[instrument(skip_all, fields(user_id = %user_id))]
    async fn fetch_orders(&self, user_id: &UserId) -> Result<Vec<OrderRecord>, OrdersApiError> {
        let url = self.orders_url(user_id);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OrdersApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| OrdersApiError::Parse(e.to_string()))
    }
}
