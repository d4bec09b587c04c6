use std::sync::Arc;

use envirolens_core::{Client, SessionContext, SessionUser};
use envirolens_vault::CredentialVault;
use tracing::{info, warn};

use crate::{
    directory::{FirestoreDocumentStore, UserDocumentStore},
    identity::{FirebaseIdentityProvider, IdentityProvider},
    login::LoginOrchestrator,
    registration::RegistrationClient,
    BiometricGate, IdentityResolver, SessionAuthenticator,
};

/// Subclient containing auth functionality.
#[derive(Clone)]
pub struct AuthClient {
    pub(crate) client: Client,
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn UserDocumentStore>,
}

impl AuthClient {
    /// Constructs a new `AuthClient` using the given remote services.
    pub fn new(
        client: Client,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn UserDocumentStore>,
    ) -> Self {
        Self {
            client,
            provider,
            store,
        }
    }

    /// The session context of the underlying client.
    pub fn session(&self) -> &SessionContext {
        self.client.session()
    }

    /// Resolver mapping usernames to account emails.
    pub fn resolver(&self) -> IdentityResolver {
        IdentityResolver::new(self.store.clone())
    }

    /// Authenticator signing in against the identity provider.
    pub fn authenticator(&self) -> SessionAuthenticator {
        SessionAuthenticator::new(self.provider.clone(), self.session().clone())
    }

    /// Orchestrator for one login form. Successful password logins are cached in `vault` and
    /// `biometric` gates the replay of the cached credential.
    pub fn login(&self, vault: CredentialVault, biometric: BiometricGate) -> LoginOrchestrator {
        LoginOrchestrator::new(self.resolver(), self.authenticator(), vault, biometric)
    }

    /// Client for account registration.
    pub fn registration(&self) -> RegistrationClient {
        RegistrationClient::new(
            self.provider.clone(),
            self.store.clone(),
            self.session().clone(),
        )
    }

    /// Signs out of the identity provider and clears the current session, returning it.
    ///
    /// The local session is cleared even when the provider call fails. When `forget` is given the
    /// credential cached in it for biometric login is deleted as well.
    pub async fn sign_out(&self, forget: Option<&CredentialVault>) -> Option<SessionUser> {
        if let Err(e) = self.provider.sign_out().await {
            warn!("Identity provider sign out failed: {e}");
        }

        let previous = self.session().clear();

        if let Some(vault) = forget {
            vault.delete().await;
        }

        if let Some(user) = &previous {
            info!(uid = %user.uid, "Signed out");
        }
        previous
    }
}

/// Extension trait for `Client` to provide access to the `AuthClient`.
pub trait AuthClientExt {
    /// Creates a new `AuthClient` talking to the services configured in the client settings.
    fn auth_new(&self) -> AuthClient;
}

impl AuthClientExt for Client {
    fn auth_new(&self) -> AuthClient {
        AuthClient::new(
            self.clone(),
            Arc::new(FirebaseIdentityProvider::new(self)),
            Arc::new(FirestoreDocumentStore::new(self)),
        )
    }
}
