use keyring::Entry;
use zeroize::Zeroizing;

use crate::{SecureStorage, SecureStorageError};

/// [`SecureStorage`] backed by the operating system keyring (macOS keychain, Windows credential
/// manager, Linux kernel keyutils).
///
/// Every service maps to one keyring entry owned by `account`.
#[derive(Debug, Clone)]
pub struct KeyringSecureStorage {
    account: String,
}

impl Default for KeyringSecureStorage {
    fn default() -> Self {
        Self::new("envirolens")
    }
}

impl KeyringSecureStorage {
    /// Creates a storage whose entries are owned by `account`.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }

    fn entry(&self, service: &str) -> Result<Entry, SecureStorageError> {
        Entry::new(service, &self.account).map_err(map_keyring_error)
    }
}

fn map_keyring_error(error: keyring::Error) -> SecureStorageError {
    match error {
        keyring::Error::PlatformFailure(e) | keyring::Error::NoStorageAccess(e) => {
            SecureStorageError::Unavailable(e.to_string())
        }
        other => SecureStorageError::Operation(other.to_string()),
    }
}

#[async_trait::async_trait]
impl SecureStorage for KeyringSecureStorage {
    async fn set(&self, service: &str, value: Zeroizing<String>) -> Result<(), SecureStorageError> {
        self.entry(service)?
            .set_password(&value)
            .map_err(map_keyring_error)
    }

    async fn get(&self, service: &str) -> Result<Option<Zeroizing<String>>, SecureStorageError> {
        match self.entry(service)?.get_password() {
            Ok(value) => Ok(Some(Zeroizing::new(value))),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(e)),
        }
    }

    async fn remove(&self, service: &str) -> Result<(), SecureStorageError> {
        match self.entry(service)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_keyring_error(e)),
        }
    }
}
