//! HTTP route handlers for the orders API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Service banner
//! GET  /orders                 - All orders
//! GET  /orders/{user_id}       - Orders placed by one user
//! POST /process-request        - Interpret and apply a free-text request
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (order store reachable)
//! ```

pub mod health;
pub mod orders;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/orders", get(orders::list_orders))
        .route("/orders/{user_id}", get(orders::list_user_orders))
        .route("/process-request", post(orders::process_request))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Drive-thru ordering system API" }))
}
