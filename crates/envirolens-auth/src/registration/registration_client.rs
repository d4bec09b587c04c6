use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use chrono::Utc;
use envirolens_core::{SessionContext, SessionUser};
use tracing::{debug, info};

use super::{RegisterForm, RegistrationError};
use crate::{
    directory::{UserDocumentStore, UserProfile},
    identity::IdentityProvider,
};

/// Client for creating accounts.
#[derive(Clone)]
pub struct RegistrationClient {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn UserDocumentStore>,
    session: SessionContext,
    in_flight: Arc<AtomicBool>,
}

impl RegistrationClient {
    pub(crate) fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn UserDocumentStore>,
        session: SessionContext,
    ) -> Self {
        Self {
            provider,
            store,
            session,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether a registration is in flight.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Registers the account described by `form` and makes it the current session.
    ///
    /// The username is checked against the directory before the account is created, so that a
    /// taken username never results in an orphan account.
    pub async fn register(&self, form: &RegisterForm) -> Result<SessionUser, RegistrationError> {
        form.validate()?;
        let area = form.area.ok_or(RegistrationError::MissingArea)?;

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        debug!(username = %form.username, "Checking username availability");
        let existing = self
            .store
            .find_by_username(&form.username)
            .await
            .map_err(RegistrationError::UsernameLookup)?;
        if !existing.is_empty() {
            return Err(RegistrationError::UsernameTaken);
        }

        let user = self
            .provider
            .create_account(&form.email, &form.password)
            .await
            .map_err(RegistrationError::AccountCreation)?;
        if user.uid.is_empty() {
            return Err(RegistrationError::MissingUserId);
        }

        let profile = UserProfile {
            name: form.name.trim().to_string(),
            username: form.username.clone(),
            email: form.email.clone(),
            area,
            created_at: Utc::now(),
        };
        self.store
            .create_user(&user, &profile)
            .await
            .map_err(RegistrationError::ProfileWrite)?;

        self.session.set(user.clone());
        info!(uid = %user.uid, "Registered new account");

        Ok(user)
    }
}

impl std::fmt::Debug for RegistrationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationClient")
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

/// Holds the in-flight flag until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, RegistrationError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| RegistrationError::InProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
