//! Session-related types.
//!
//! The identity provider authenticates the visitor; what it hands the
//! storefront is a `CurrentSession`, kept in the session store for the
//! lifetime of the browser session.

use serde::{Deserialize, Serialize};

use drive_thru_core::UserId;

/// Session-stored identity.
///
/// `user_id` is whatever the identity provider issued. It is kept as a raw
/// string because the provider owns its format; [`CurrentSession::user_id`]
/// turns it into a [`UserId`] when the storefront needs one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSession {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

impl CurrentSession {
    /// A session for a signed-in user.
    #[must_use]
    pub fn authenticated(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// A session with no user attached.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// The signed-in user, if any.
    ///
    /// Missing and empty ids both mean "not signed in". Any other id is
    /// taken as issued, whatever its length or content.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
            .as_deref()
            .and_then(|id| UserId::from_issued(id).ok())
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current identity.
    pub const CURRENT_SESSION: &str = "current_session";
}
