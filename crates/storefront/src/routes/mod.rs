//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Orders landing page data
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /auth/config            - Identity provider client bootstrap settings
//! POST /auth/logout            - Clear the session
//! ```

pub mod auth;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/config", get(auth::client_config))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Orders landing page
        .route("/", get(home::home))
        // Auth routes
        .nest("/auth", auth_routes())
}
