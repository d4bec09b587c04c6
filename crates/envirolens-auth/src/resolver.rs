use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::directory::{DocumentStoreError, UserDocumentStore};

/// Errors that can occur when resolving a username.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No user document carries the username, or the matching document has no email.
    #[error("Username not found.")]
    NotFound,
    #[allow(missing_docs)]
    #[error(transparent)]
    Transport(#[from] DocumentStoreError),
}

/// Maps the username a user signs in with to the email the identity provider expects.
#[derive(Clone)]
pub struct IdentityResolver {
    store: Arc<dyn UserDocumentStore>,
}

impl IdentityResolver {
    #[allow(missing_docs)]
    pub fn new(store: Arc<dyn UserDocumentStore>) -> Self {
        Self { store }
    }

    /// Returns the email registered for `handle`.
    ///
    /// Usernames are not guaranteed unique in the store. When several documents match, the first
    /// one returned wins.
    pub async fn resolve(&self, handle: &str) -> Result<String, ResolveError> {
        debug!(handle, "Resolving username");
        let records = self.store.find_by_username(handle).await?;

        if records.len() > 1 {
            warn!(
                handle,
                matches = records.len(),
                "Username matches several accounts, using the first one"
            );
        }

        records
            .into_iter()
            .next()
            .and_then(|record| record.email)
            .ok_or(ResolveError::NotFound)
    }
}
