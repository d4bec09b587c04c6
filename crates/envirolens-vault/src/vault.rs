use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::{Credential, SecureStorage, SecureStorageError};

/// Service name the credential is stored under unless configured otherwise.
pub const DEFAULT_SERVICE: &str = "com.envirolens.login";

/// Errors that can occur when caching a credential.
#[derive(Debug, Error)]
pub enum VaultError {
    #[allow(missing_docs)]
    #[error(transparent)]
    Storage(#[from] SecureStorageError),
    #[allow(missing_docs)]
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Single-slot credential cache backing biometric login.
///
/// At most one [`Credential`] is stored at a time; every save replaces the previous one.
#[derive(Clone)]
pub struct CredentialVault {
    storage: Arc<dyn SecureStorage>,
    service: String,
}

impl CredentialVault {
    /// Creates a vault storing its credential under [`DEFAULT_SERVICE`].
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self::with_service(storage, DEFAULT_SERVICE)
    }

    /// Creates a vault storing its credential under `service`.
    pub fn with_service(storage: Arc<dyn SecureStorage>, service: impl Into<String>) -> Self {
        Self {
            storage,
            service: service.into(),
        }
    }

    /// The service name the credential is stored under.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Stores the credential, replacing any credential saved earlier.
    pub async fn save(&self, identifier: &str, secret: &str) -> Result<(), VaultError> {
        let credential = Credential::new(identifier, secret);
        let value = Zeroizing::new(serde_json::to_string(&credential)?);

        self.storage.set(&self.service, value).await?;
        debug!(service = %self.service, "Credential cached");
        Ok(())
    }

    /// Returns the cached credential.
    ///
    /// Lookup failures and unreadable entries are reported the same way as an empty vault.
    pub async fn retrieve(&self) -> Option<Credential> {
        let value = match self.storage.get(&self.service).await {
            Ok(value) => value?,
            Err(e) => {
                warn!(service = %self.service, "Failed to read cached credential: {e}");
                return None;
            }
        };

        match serde_json::from_str(&value) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!(service = %self.service, "Cached credential is unreadable: {e}");
                None
            }
        }
    }

    /// Removes the cached credential. Calling this on an empty vault is a no-op.
    pub async fn delete(&self) {
        if let Err(e) = self.storage.remove(&self.service).await {
            warn!(service = %self.service, "Failed to delete cached credential: {e}");
        }
    }
}

impl std::fmt::Debug for CredentialVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialVault")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
