use std::{collections::HashMap, sync::Arc};

use thiserror::Error;
use tokio::sync::RwLock;
use zeroize::Zeroizing;

/// Errors reported by a [`SecureStorage`] implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecureStorageError {
    /// The platform keystore cannot be used on this device.
    #[error("Secure storage is unavailable: {0}")]
    Unavailable(String),

    /// The keystore rejected the operation.
    #[error("Secure storage operation failed: {0}")]
    Operation(String),
}

/// Platform keystore holding one value per service name.
///
/// Hosts implement this on top of the platform keystore (keychain generic passwords, Android
/// keystore backed preferences, ...). Values are encrypted at rest by the platform and scoped to
/// the application.
#[async_trait::async_trait]
pub trait SecureStorage: Send + Sync {
    /// Stores `value` under `service`, replacing any existing value.
    async fn set(&self, service: &str, value: Zeroizing<String>) -> Result<(), SecureStorageError>;

    /// Reads the value stored under `service`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` - A value exists for this service
    /// - `Ok(None)` - Nothing is stored (not an error)
    /// - `Err(e)` - The keystore lookup failed
    async fn get(&self, service: &str) -> Result<Option<Zeroizing<String>>, SecureStorageError>;

    /// Removes the value stored under `service`. Removing a missing value succeeds.
    async fn remove(&self, service: &str) -> Result<(), SecureStorageError>;
}

/// In-memory [`SecureStorage`], lost when the process exits.
#[derive(Default, Clone)]
pub struct MemorySecureStorage {
    values: Arc<RwLock<HashMap<String, Zeroizing<String>>>>,
}

#[async_trait::async_trait]
impl SecureStorage for MemorySecureStorage {
    async fn set(&self, service: &str, value: Zeroizing<String>) -> Result<(), SecureStorageError> {
        self.values.write().await.insert(service.to_owned(), value);
        Ok(())
    }

    async fn get(&self, service: &str) -> Result<Option<Zeroizing<String>>, SecureStorageError> {
        Ok(self.values.read().await.get(service).cloned())
    }

    async fn remove(&self, service: &str) -> Result<(), SecureStorageError> {
        self.values.write().await.remove(service);
        Ok(())
    }
}
