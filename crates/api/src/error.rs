//! API error type with Sentry integration.
//!
//! Errors are returned to clients as `{"detail": "<message>"}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::OrderingError;
use crate::store::StoreError;

/// Application-level error type for the orders API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Ordering(OrderingError::Interpreter(_)) => StatusCode::BAD_GATEWAY,
            Self::Ordering(OrderingError::NoValidItems) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Ordering(OrderingError::EmptyRequest) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Ordering(OrderingError::Store(_)) | Self::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server-side failures to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Ordering(OrderingError::Interpreter(_)) => {
                "Could not understand the request right now".to_string()
            }
            Self::Ordering(OrderingError::Store(_)) | Self::Store(_) => {
                "Internal server error".to_string()
            }
            Self::Ordering(OrderingError::NoValidItems) => {
                "No valid menu items found in request".to_string()
            }
            _ => self.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
