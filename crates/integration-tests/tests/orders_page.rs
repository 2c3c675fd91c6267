//! Storefront landing page against a stub orders API.
//!
//! Covers what the page hands the browser for signed-out and signed-in
//! visitors, and what the storefront asks the orders API for.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use drive_thru_integration_tests::{
    StubOrdersApi, StubReply, client, sign_in_as, spawn_storefront,
};

async fn landing_page(client: &reqwest::Client, base_url: &str) -> (StatusCode, String) {
    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("landing page request");
    let status = resp.status();
    (status, resp.text().await.expect("landing page body"))
}

fn as_json(body: &str) -> Value {
    serde_json::from_str(body).expect("landing page JSON")
}

#[tokio::test]
async fn test_signed_out_visitor_gets_empty_page() {
    let api = StubOrdersApi::start(StubReply::Json(json!([{"id": 1}]))).await;
    let storefront = spawn_storefront(&api.base_url).await;

    let (status, body) = landing_page(&client(), &storefront).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"userId": null, "initialOrders": []}));
    assert!(api.paths().is_empty(), "no request for signed-out visitors");
}

#[tokio::test]
async fn test_signed_in_user_gets_their_orders() {
    let orders = json!([{"id": 1, "item": "widget"}]);
    let api = StubOrdersApi::start(StubReply::Json(orders.clone())).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "u1").await;
    let (status, body) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"userId": "u1", "initialOrders": orders}));
    assert_eq!(api.paths(), vec!["/orders/u1".to_string()]);
}

#[tokio::test]
async fn test_signed_in_user_without_orders() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "u2").await;
    let (status, body) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body), json!({"userId": "u2", "initialOrders": []}));
    assert_eq!(api.paths().len(), 1);
}

#[tokio::test]
async fn test_empty_user_id_is_signed_out() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "").await;
    let (_, body) = landing_page(&client, &storefront).await;

    assert_eq!(as_json(&body), json!({"userId": null, "initialOrders": []}));
    assert!(api.paths().is_empty());
}

#[tokio::test]
async fn test_user_id_is_percent_encoded() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "a b/c").await;
    landing_page(&client, &storefront).await;

    assert_eq!(api.paths(), vec!["/orders/a%20b%2Fc".to_string()]);
}

#[tokio::test]
async fn test_long_user_id_is_still_fetched() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();
    let user_id = "u".repeat(256);

    sign_in_as(&client, &storefront, &user_id).await;
    let (status, body) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["userId"], user_id.as_str());
    assert_eq!(api.paths(), vec![format!("/orders/{user_id}")]);
}

#[tokio::test]
async fn test_trailing_slash_in_api_url() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&format!("{}/", api.base_url)).await;
    let client = client();

    sign_in_as(&client, &storefront, "u1").await;
    landing_page(&client, &storefront).await;

    assert_eq!(api.paths(), vec!["/orders/u1".to_string()]);
}

#[tokio::test]
async fn test_backend_failure_is_bad_gateway() {
    let api = StubOrdersApi::start(StubReply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "u3").await;
    let (status, body) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, "Orders are temporarily unavailable");
    assert!(!body.contains("stub failure"));
}

#[tokio::test]
async fn test_non_list_body_is_bad_gateway() {
    let api = StubOrdersApi::start(StubReply::Json(json!({"detail": "nope"}))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "u4").await;
    let (status, _) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_unreachable_backend_is_bad_gateway() {
    // Nothing listens on the discard port
    let storefront = spawn_storefront("http://127.0.0.1:9").await;
    let client = client();

    sign_in_as(&client, &storefront, "u5").await;
    let (status, _) = landing_page(&client, &storefront).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_logout_returns_to_signed_out() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    sign_in_as(&client, &storefront, "u1").await;
    let resp = client
        .post(format!("{storefront}/auth/logout"))
        .send()
        .await
        .expect("logout request");
    // The redirect to `/` is followed
    assert_eq!(resp.status(), StatusCode::OK);

    let (_, body) = landing_page(&client, &storefront).await;
    assert_eq!(as_json(&body), json!({"userId": null, "initialOrders": []}));
}

#[tokio::test]
async fn test_auth_config_and_health() {
    let api = StubOrdersApi::start(StubReply::Json(json!([]))).await;
    let storefront = spawn_storefront(&api.base_url).await;
    let client = client();

    let config: Value = client
        .get(format!("{storefront}/auth/config"))
        .send()
        .await
        .expect("config request")
        .json()
        .await
        .expect("config JSON");
    assert_eq!(config["signInUrl"], "/sign-in");
    assert_eq!(config["afterSignInUrl"], "/orders");

    let resp = client
        .get(format!("{storefront}/health"))
        .send()
        .await
        .expect("health request");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));
}
