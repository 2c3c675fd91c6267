//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use drive_thru_core::{Order, UserId};

use crate::error::{ApiError, Result};
use crate::services::Outcome;
use crate::state::AppState;

/// Body of `POST /process-request`.
#[derive(Debug, Deserialize)]
pub struct ProcessRequest {
    pub user_input: String,
    /// Identity-provider user placing the order. Blank means anonymous.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Reply to `POST /process-request`.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Order>,
}

impl From<Outcome> for ProcessResponse {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Placed(order) => Self {
                message: "Order placed successfully".to_string(),
                order: Some(order),
            },
            Outcome::Cancelled(id) => Self {
                message: format!("Order #{id} cancelled successfully"),
                order: None,
            },
            Outcome::NotFound(id) => Self {
                message: format!("Order #{id} not found"),
                order: None,
            },
        }
    }
}

/// All orders, oldest first.
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    Ok(Json(state.store().list().await?))
}

/// Orders placed by one user, oldest first.
pub async fn list_user_orders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<Order>>> {
    let user_id = parse_user_id(&user_id)?;
    Ok(Json(state.store().list_for_user(&user_id).await?))
}

/// Interpret a customer's request and place or cancel an order.
pub async fn process_request(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>> {
    let user_id = request
        .user_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .map(parse_user_id)
        .transpose()?;

    let outcome = state
        .ordering()
        .process(&request.user_input, user_id)
        .await?;

    Ok(Json(outcome.into()))
}

fn parse_user_id(raw: &str) -> Result<UserId> {
    UserId::parse(raw).map_err(|e| ApiError::BadRequest(format!("invalid user_id: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::interpreter::{Intent, InterpreterError, OrderInterpreter};
    use crate::store::MemoryOrderStore;

    /// Interpreter that parses the request text itself as the completion.
    struct EchoInterpreter;

    #[async_trait]
    impl OrderInterpreter for EchoInterpreter {
        async fn interpret(&self, user_input: &str) -> std::result::Result<Intent, InterpreterError> {
            Intent::from_completion(user_input)
        }
    }

    fn app() -> Router {
        let state = AppState::new(Arc::new(MemoryOrderStore::new()), Arc::new(EchoInterpreter));
        crate::routes::routes().with_state(state)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, value)
    }

    fn process(body: &Value) -> Request<Body> {
        Request::post("/process-request")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let (status, body) = send(&app(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Drive-thru ordering system API");
    }

    #[tokio::test]
    async fn test_place_then_list_for_user() {
        let app = app();
        let order = json!({"type": "order", "items": [{"item": "burgers", "quantity": 2}]});

        let (status, body) = send(
            &app,
            process(&json!({"user_input": order.to_string(), "user_id": "u1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Order placed successfully");
        assert_eq!(body["order"]["id"], 1);
        assert_eq!(body["order"]["total_items"], 2);
        assert_eq!(body["order"]["user_id"], "u1");

        // Anonymous order is not returned for u1
        send(&app, process(&json!({"user_input": order.to_string()}))).await;

        let (status, mine) = send(&app, get("/orders/u1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(mine.as_array().unwrap().len(), 1);

        let (_, all) = send(&app, get("/orders")).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let (_, nobody) = send(&app, get("/orders/u9")).await;
        assert_eq!(nobody, json!([]));
    }

    #[tokio::test]
    async fn test_cancel_messages() {
        let app = app();
        let order = json!({"type": "order", "items": [{"item": "fries", "quantity": 1}]});
        let cancel = json!({"type": "cancel", "order_id": 1});
        send(&app, process(&json!({"user_input": order.to_string()}))).await;

        let (status, body) =
            send(&app, process(&json!({"user_input": cancel.to_string()}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Order #1 cancelled successfully"}));

        let (_, body) = send(&app, process(&json!({"user_input": cancel.to_string()}))).await;
        assert_eq!(body, json!({"message": "Order #1 not found"}));
    }

    #[tokio::test]
    async fn test_off_menu_order_is_422() {
        let order = json!({"type": "order", "items": [{"item": "pizza", "quantity": 1}]});
        let (status, body) =
            send(&app(), process(&json!({"user_input": order.to_string()}))).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_user_id_is_400() {
        let (status, body) = send(
            &app(),
            process(&json!({"user_input": "{}", "user_id": "bad\u{7}id"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("invalid user_id"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let response = app.clone().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app.oneshot(get("/health/ready")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
