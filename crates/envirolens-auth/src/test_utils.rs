//! Collaborators for unit tests.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use envirolens_core::{ApiError, SessionUser};
use envirolens_vault::{MemorySecureStorage, SecureStorage, SecureStorageError};
use reqwest::StatusCode;
use tokio::sync::Notify;
use zeroize::Zeroizing;

use crate::{
    directory::{DocumentStoreError, UserDocumentStore, UserProfile, UserRecord},
    identity::{IdentityProvider, IdentityProviderError},
    BiometricError, BiometricPrompt,
};

fn unreachable_error() -> ApiError {
    ApiError::ResponseContent {
        status: StatusCode::SERVICE_UNAVAILABLE,
        message: "connection refused".to_string(),
    }
}

fn session_for(email: &str) -> SessionUser {
    let name = email.split('@').next().unwrap_or(email);
    SessionUser::new(
        format!("uid-{name}"),
        email,
        format!("id-token-{name}"),
        format!("refresh-token-{name}"),
        3600,
    )
}

/// Waits for a permit when a hold was requested.
async fn wait_for_release(hold: &Mutex<Option<Arc<Notify>>>) {
    let notify = hold.lock().unwrap().clone();
    if let Some(notify) = notify {
        notify.notified().await;
    }
}

/// Identity provider keeping accounts in memory. Rejects unknown pairs with
/// `INVALID_LOGIN_CREDENTIALS`.
#[derive(Default)]
pub(crate) struct MockIdentityProvider {
    accounts: Mutex<HashMap<String, String>>,
    sign_in_calls: Mutex<Vec<(String, String)>>,
    created: Mutex<Vec<String>>,
    sign_out_calls: AtomicUsize,
    unreachable: bool,
    failing_sign_out: bool,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl MockIdentityProvider {
    pub(crate) fn with_account(mut self, email: &str, secret: &str) -> Self {
        self.accounts
            .get_mut()
            .unwrap()
            .insert(email.to_string(), secret.to_string());
        self
    }

    pub(crate) fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub(crate) fn failing_sign_out(mut self) -> Self {
        self.failing_sign_out = true;
        self
    }

    /// Every later sign in waits for one `notify_one` on the returned handle.
    pub(crate) fn hold_sign_in(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub(crate) fn sign_in_calls(&self) -> Vec<(String, String)> {
        self.sign_in_calls.lock().unwrap().clone()
    }

    pub(crate) fn created_accounts(&self) -> Vec<String> {
        self.created.lock().unwrap().clone()
    }

    pub(crate) fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError> {
        if self.unreachable {
            return Err(unreachable_error().into());
        }

        let mut accounts = self.accounts.lock().unwrap();
        if accounts.contains_key(email) {
            return Err(IdentityProviderError::Rejected {
                message: "EMAIL_EXISTS".to_string(),
            });
        }
        accounts.insert(email.to_string(), secret.to_string());
        self.created.lock().unwrap().push(email.to_string());

        Ok(session_for(email))
    }

    async fn sign_in(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError> {
        self.sign_in_calls
            .lock()
            .unwrap()
            .push((email.to_string(), secret.to_string()));
        wait_for_release(&self.hold).await;

        if self.unreachable {
            return Err(unreachable_error().into());
        }

        let matches = self
            .accounts
            .lock()
            .unwrap()
            .get(email)
            .is_some_and(|stored| stored == secret);
        if !matches {
            return Err(IdentityProviderError::Rejected {
                message: "INVALID_LOGIN_CREDENTIALS".to_string(),
            });
        }

        Ok(session_for(email))
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_sign_out {
            return Err(unreachable_error().into());
        }
        Ok(())
    }
}

/// Document store keeping user documents in memory, in insertion order.
#[derive(Default)]
pub(crate) struct MockDocumentStore {
    users: Mutex<Vec<UserRecord>>,
    lookups: Mutex<Vec<String>>,
    profiles: Mutex<Vec<(String, UserProfile)>>,
    failing: bool,
    failing_writes: bool,
}

impl MockDocumentStore {
    pub(crate) fn with_user(self, username: &str, email: &str) -> Self {
        self.with_record(username, Some(email))
    }

    pub(crate) fn with_record(mut self, username: &str, email: Option<&str>) -> Self {
        let users = self.users.get_mut().unwrap();
        let id = format!("doc-{}", users.len());
        users.push(UserRecord {
            id,
            username: username.to_string(),
            email: email.map(str::to_string),
        });
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub(crate) fn failing_writes(mut self) -> Self {
        self.failing_writes = true;
        self
    }

    pub(crate) fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }

    pub(crate) fn profiles(&self) -> Vec<(String, UserProfile)> {
        self.profiles.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl UserDocumentStore for MockDocumentStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<UserRecord>, DocumentStoreError> {
        self.lookups.lock().unwrap().push(username.to_string());
        if self.failing {
            return Err(unreachable_error().into());
        }

        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|user| user.username == username)
            .cloned()
            .collect())
    }

    async fn create_user(
        &self,
        user: &SessionUser,
        profile: &UserProfile,
    ) -> Result<(), DocumentStoreError> {
        if self.failing_writes {
            return Err(DocumentStoreError::Rejected {
                message: "Missing or insufficient permissions.".to_string(),
            });
        }

        self.users.lock().unwrap().push(UserRecord {
            id: user.uid.clone(),
            username: profile.username.clone(),
            email: Some(profile.email.clone()),
        });
        self.profiles
            .lock()
            .unwrap()
            .push((user.uid.clone(), profile.clone()));
        Ok(())
    }
}

/// Biometric prompt with a fixed availability and outcome.
pub(crate) struct MockBiometricPrompt {
    availability: Result<(), BiometricError>,
    outcome: Result<(), BiometricError>,
    reasons: Mutex<Vec<String>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl MockBiometricPrompt {
    fn new(availability: Result<(), BiometricError>, outcome: Result<(), BiometricError>) -> Self {
        Self {
            availability,
            outcome,
            reasons: Mutex::new(Vec::new()),
            hold: Mutex::new(None),
        }
    }

    pub(crate) fn succeeding() -> Self {
        Self::new(Ok(()), Ok(()))
    }

    pub(crate) fn failing(message: &str) -> Self {
        Self::new(Ok(()), Err(BiometricError::Failed(message.to_string())))
    }

    pub(crate) fn unavailable(message: &str) -> Self {
        Self::new(
            Err(BiometricError::Unavailable(message.to_string())),
            Ok(()),
        )
    }

    /// Every later evaluation waits for one `notify_one` on the returned handle.
    pub(crate) fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    /// Reasons of the evaluations shown so far.
    pub(crate) fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl BiometricPrompt for MockBiometricPrompt {
    async fn can_evaluate(&self) -> Result<(), BiometricError> {
        self.availability.clone()
    }

    async fn evaluate(&self, reason: &str) -> Result<(), BiometricError> {
        self.reasons.lock().unwrap().push(reason.to_string());
        wait_for_release(&self.hold).await;
        self.outcome.clone()
    }
}

/// Secure storage whose keystore is never reachable.
pub(crate) struct UnavailableStorage;

#[async_trait::async_trait]
impl SecureStorage for UnavailableStorage {
    async fn set(&self, _: &str, _: Zeroizing<String>) -> Result<(), SecureStorageError> {
        Err(SecureStorageError::Unavailable("keystore locked".into()))
    }

    async fn get(&self, _: &str) -> Result<Option<Zeroizing<String>>, SecureStorageError> {
        Err(SecureStorageError::Unavailable("keystore locked".into()))
    }

    async fn remove(&self, _: &str) -> Result<(), SecureStorageError> {
        Err(SecureStorageError::Unavailable("keystore locked".into()))
    }
}

/// In-memory secure storage whose writes wait for a permit when a hold was requested.
#[derive(Default)]
pub(crate) struct HeldStorage {
    inner: MemorySecureStorage,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl HeldStorage {
    /// Every later write waits for one `notify_one` on the returned handle.
    pub(crate) fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }
}

#[async_trait::async_trait]
impl SecureStorage for HeldStorage {
    async fn set(&self, service: &str, value: Zeroizing<String>) -> Result<(), SecureStorageError> {
        wait_for_release(&self.hold).await;
        self.inner.set(service, value).await
    }

    async fn get(&self, service: &str) -> Result<Option<Zeroizing<String>>, SecureStorageError> {
        self.inner.get(service).await
    }

    async fn remove(&self, service: &str) -> Result<(), SecureStorageError> {
        self.inner.remove(service).await
    }
}
