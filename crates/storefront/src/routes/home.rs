//! Orders landing page handler.
//!
//! Responds with the page data produced by the orders page loader. Rendering
//! it is the browser's job.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::OptionalSession;
use crate::services::LoadResult;
use crate::state::AppState;

/// Load the landing page for the current visitor.
///
/// A failed orders fetch for a signed-in user becomes a 502 through
/// [`AppError`](crate::error::AppError); signed-out visitors always succeed.
#[instrument(skip_all)]
pub async fn home(
    State(state): State<AppState>,
    OptionalSession(session): OptionalSession,
) -> Result<Json<LoadResult>> {
    let data = state.orders_page().load(session.as_ref()).await?;
    Ok(Json(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use drive_thru_core::UserId;
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::services::{OrderRecord, OrdersApi, OrdersApiError};

    struct CountingApi {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl OrdersApi for CountingApi {
        async fn fetch_orders(&self, _: &UserId) -> std::result::Result<Vec<OrderRecord>, OrdersApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_home_without_session_layer_is_anonymous() {
        let api = Arc::new(CountingApi {
            calls: AtomicUsize::new(0),
        });
        let state = AppState::with_orders_api(StorefrontConfig::default(), api.clone());
        let app: Router = crate::routes::routes().with_state(state);

        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "userId": null, "initialOrders": [] })
        );
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }
}
