//! Session persistence for the CLI.
//!
//! Every invocation is a new process, so the session issued by `login`, `unlock` or `register`
//! is stored next to the cached credential and restored on startup until `logout` clears it.

use std::sync::Arc;

use color_eyre::eyre::Result;
use envirolens_core::{Client, SessionUser};
use envirolens_vault::SecureStorage;
use tracing::{debug, warn};
use zeroize::Zeroizing;

/// Service name the session is stored under.
const SESSION_SERVICE: &str = "com.envirolens.session";

pub struct SessionStore {
    storage: Arc<dyn SecureStorage>,
}

impl SessionStore {
    pub(crate) fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self { storage }
    }

    /// Save the current session of `client`. Does nothing when no session is current.
    pub(crate) async fn save(&self, client: &Client) -> Result<()> {
        let Some(user) = client.session().current() else {
            return Ok(());
        };

        let value = Zeroizing::new(serde_json::to_string(&user)?);
        self.storage.set(SESSION_SERVICE, value).await?;

        debug!(uid = %user.uid, "Session saved");
        Ok(())
    }

    /// Makes the persisted session current. A store that can't be read is treated as empty.
    pub(crate) async fn restore(&self, client: &Client) {
        match self.load().await {
            Ok(Some(user)) => {
                debug!(uid = %user.uid, "Session restored");
                client.session().set(user);
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to restore session: {e}"),
        }
    }

    async fn load(&self) -> Result<Option<SessionUser>> {
        let Some(value) = self.storage.get(SESSION_SERVICE).await? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&value)?))
    }

    /// Remove the persisted session so it is not restored on next startup.
    pub(crate) async fn clear(&self) -> Result<()> {
        self.storage.remove(SESSION_SERVICE).await?;

        debug!("Session cleared");
        Ok(())
    }
}
