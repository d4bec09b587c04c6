//! Session tracking.
//!
//! The identity provider issues a [`SessionUser`] when a user signs in or registers. The
//! [`SessionContext`] holds the current one and lets the view layer observe changes, so that
//! navigating between the unauthenticated and authenticated views only depends on the presence
//! of a session.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use zeroize::Zeroizing;

/// The authenticated identity returned by the identity provider.
///
/// Serializes with its tokens so that hosts can persist and restore the session. Render
/// [`SessionUser::summary`] instead.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Provider-assigned account id, also the id of the user's profile document.
    pub uid: String,
    /// Canonical account identifier.
    pub email: String,
    id_token: Zeroizing<String>,
    refresh_token: Zeroizing<String>,
    /// When the id token stops being accepted by the provider.
    pub expires_at: DateTime<Utc>,
}

impl SessionUser {
    /// Creates a session from the values returned by the identity provider.
    pub fn new(
        uid: impl Into<String>,
        email: impl Into<String>,
        id_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in_seconds: i64,
    ) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
            id_token: Zeroizing::new(id_token.into()),
            refresh_token: Zeroizing::new(refresh_token.into()),
            expires_at: expiry_after(expires_in_seconds),
        }
    }

    /// Bearer token for requests made on behalf of this user.
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Token used to obtain a new id token.
    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    /// Whether the id token has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    /// A view of this session that is safe to render or persist.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            uid: self.uid.clone(),
            email: self.email.clone(),
            expires_at: self.expires_at,
        }
    }
}

/// Saturates at the bounds of [`DateTime`] when the lifetime is out of range.
fn expiry_after(seconds: i64) -> DateTime<Utc> {
    Duration::try_seconds(seconds)
        .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
        .unwrap_or(if seconds < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

// We manually implement Debug to make sure we don't print the tokens
impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionUser")
            .field("uid", &self.uid)
            .field("email", &self.email)
            .field("id_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Token-free description of a session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    #[allow(missing_docs)]
    pub uid: String,
    #[allow(missing_docs)]
    pub email: String,
    #[allow(missing_docs)]
    pub expires_at: DateTime<Utc>,
}

/// Holds the current [`SessionUser`].
///
/// At most one session is current at a time. Clones share the same state.
#[derive(Debug, Clone)]
pub struct SessionContext {
    sender: Arc<watch::Sender<Option<SessionUser>>>,
}

impl Default for SessionContext {
    fn default() -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            sender: Arc::new(sender),
        }
    }
}

impl SessionContext {
    /// The current session, if any.
    pub fn current(&self) -> Option<SessionUser> {
        self.sender.borrow().clone()
    }

    /// Whether a session is current.
    pub fn is_authenticated(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Replaces the current session, returning the previous one.
    pub fn set(&self, user: SessionUser) -> Option<SessionUser> {
        tracing::debug!(uid = %user.uid, "Session established");
        self.sender.send_replace(Some(user))
    }

    /// Clears the current session, returning the previous one.
    pub fn clear(&self) -> Option<SessionUser> {
        let previous = self.sender.send_replace(None);
        if previous.is_some() {
            tracing::debug!("Session cleared");
        }
        previous
    }

    /// Observe changes of the current session.
    ///
    /// The receiver starts with the current value marked as seen.
    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.sender.subscribe()
    }
}
