#![doc = include_str!("../README.md")]

mod credential;
#[cfg(feature = "keyring")]
mod keyring_storage;
mod storage;
mod vault;

pub use credential::Credential;
#[cfg(feature = "keyring")]
pub use keyring_storage::KeyringSecureStorage;
pub use storage::{MemorySecureStorage, SecureStorage, SecureStorageError};
pub use vault::{CredentialVault, VaultError, DEFAULT_SERVICE};
