//! Integration tests for Drive-Thru.
//!
//! Every server under test is started in-process on `127.0.0.1:0` and driven
//! over real HTTP with `reqwest`.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p drive-thru-integration-tests
//!
//! # Including tests that need PostgreSQL (DATABASE_URL must be set)
//! cargo test -p drive-thru-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `orders_page` - Storefront landing page against a stub orders API
//! - `orders_api` - Orders API end to end, and the storefront reading from it

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::post,
};
use reqwest::Client;
use serde_json::Value;
use tower_sessions::Session;

use drive_thru_api::interpreter::{Intent, InterpreterError, OrderInterpreter};
use drive_thru_storefront::config::{OrdersApiConfig, StorefrontConfig};
use drive_thru_storefront::middleware::set_current_session;
use drive_thru_storefront::models::CurrentSession;
use drive_thru_storefront::state::AppState;

/// Path of the test-only sign-in hook mounted on the storefront.
pub const SIGN_IN_PATH: &str = "/test/sign-in";

/// Serve `router` on an ephemeral local port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });

    addr
}

/// HTTP client that keeps cookies between requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

// ============================================================================
// Stub orders API
// ============================================================================

/// What the stub orders API answers with.
#[derive(Debug, Clone)]
pub enum StubReply {
    Json(Value),
    Status(StatusCode),
}

/// A stand-in for the orders API that records every request path.
#[derive(Clone)]
pub struct StubOrdersApi {
    pub base_url: String,
    paths: Arc<Mutex<Vec<String>>>,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    paths: Arc<Mutex<Vec<String>>>,
}

impl StubOrdersApi {
    /// Start a stub that answers every request with `reply`.
    pub async fn start(reply: StubReply) -> Self {
        let paths = Arc::new(Mutex::new(Vec::new()));
        let router = Router::new().fallback(stub_handler).with_state(StubState {
            reply,
            paths: paths.clone(),
        });
        let addr = spawn(router).await;

        Self {
            base_url: format!("http://{addr}"),
            paths,
        }
    }

    /// Raw (still percent-encoded) paths requested so far.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

async fn stub_handler(State(state): State<StubState>, uri: Uri) -> Response {
    state.paths.lock().unwrap().push(uri.path().to_string());
    match state.reply {
        StubReply::Json(body) => Json(body).into_response(),
        StubReply::Status(status) => (status, "stub failure").into_response(),
    }
}

// ============================================================================
// Storefront
// ============================================================================

/// Start a storefront that reads orders from `orders_api_url`.
///
/// Adds `POST /test/sign-in`, which stores the posted [`CurrentSession`] the
/// way the identity provider integration would.
pub async fn spawn_storefront(orders_api_url: &str) -> String {
    let config = StorefrontConfig {
        orders_api: OrdersApiConfig::new(orders_api_url).expect("valid orders API URL"),
        ..StorefrontConfig::default()
    };
    let state = AppState::new(config).expect("storefront state");
    let extra = Router::new().route(SIGN_IN_PATH, post(sign_in));

    let addr = spawn(drive_thru_storefront::app_with_routes(state, extra)).await;
    format!("http://{addr}")
}

async fn sign_in(session: Session, Json(current): Json<CurrentSession>) -> StatusCode {
    match set_current_session(&session, &current).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Sign `client` in to the storefront at `base_url` as `user_id`.
pub async fn sign_in_as(client: &Client, base_url: &str, user_id: &str) {
    let resp = client
        .post(format!("{base_url}{SIGN_IN_PATH}"))
        .json(&CurrentSession::authenticated(user_id))
        .send()
        .await
        .expect("sign-in request");
    assert!(resp.status().is_success(), "sign-in failed: {}", resp.status());
}

// ============================================================================
// Orders API
// ============================================================================

/// Interpreter that treats the customer's text as the model completion.
///
/// Tests post the intent JSON itself as `user_input`.
pub struct EchoInterpreter;

#[async_trait]
impl OrderInterpreter for EchoInterpreter {
    async fn interpret(&self, user_input: &str) -> Result<Intent, InterpreterError> {
        Intent::from_completion(user_input)
    }
}
