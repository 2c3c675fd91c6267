//! Auth route handlers.
//!
//! Sign-in itself happens with the identity provider in the browser. The
//! storefront only publishes the settings the browser SDK needs and lets the
//! visitor drop their session.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect},
};
use serde::Serialize;
use tower_sessions::Session;

use crate::error::{Result, clear_sentry_user};
use crate::middleware::clear_current_session;
use crate::state::AppState;

/// Settings for initializing the identity provider's browser client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientAuthConfig {
    pub publishable_key: Option<String>,
    pub sign_in_url: String,
    pub sign_up_url: String,
    pub after_sign_in_url: String,
    pub after_sign_up_url: String,
}

/// Publish the identity provider client settings.
pub async fn client_config(State(state): State<AppState>) -> Json<ClientAuthConfig> {
    let auth = &state.config().auth;
    Json(ClientAuthConfig {
        publishable_key: auth.publishable_key.clone(),
        sign_in_url: auth.sign_in_url.clone(),
        sign_up_url: auth.sign_up_url.clone(),
        after_sign_in_url: auth.after_sign_in_url.clone(),
        after_sign_up_url: auth.after_sign_up_url.clone(),
    })
}

/// Clear the current identity and return to the landing page.
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    clear_current_session(&session).await?;
    clear_sentry_user();
    tracing::info!("Session cleared");
    Ok(Redirect::to("/"))
}
