//! Session extractor and helpers.
//!
//! The identity provider decides who the visitor is; these helpers store and
//! read that decision in the session.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::models::{CurrentSession, session_keys};

/// Extractor that optionally gets the current identity.
///
/// Never rejects: requests without a session layer, without a stored
/// identity, or whose session cannot be read all yield `None`.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalSession(session): OptionalSession,
/// ) -> impl IntoResponse {
///     match session.and_then(|s| s.user_id()) {
///         Some(user_id) => format!("Hello, {user_id}!"),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct OptionalSession(pub Option<CurrentSession>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self(None));
        };

        let current = match session
            .get::<CurrentSession>(session_keys::CURRENT_SESSION)
            .await
        {
            Ok(current) => current,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session, treating as signed out");
                None
            }
        };

        Ok(Self(current))
    }
}

/// Helper to store the current identity in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_session(
    session: &Session,
    current: &CurrentSession,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::CURRENT_SESSION, current)
        .await
}

/// Helper to clear the current identity from the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_session(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentSession>(session_keys::CURRENT_SESSION)
        .await?;
    Ok(())
}
