use std::sync::Arc;

use envirolens_core::{SessionContext, SessionUser};
use thiserror::Error;
use tracing::{debug, info};

use crate::identity::{IdentityProvider, IdentityProviderError};

/// Errors that can occur when authenticating with the identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The provider refused the credential. Contains the provider's description verbatim.
    #[error("{0}")]
    Rejected(String),
    /// The provider could not be reached or answered with something unexpected.
    #[error(transparent)]
    Transport(IdentityProviderError),
}

impl From<IdentityProviderError> for AuthError {
    fn from(error: IdentityProviderError) -> Self {
        match error {
            IdentityProviderError::Rejected { message } => AuthError::Rejected(message),
            other => AuthError::Transport(other),
        }
    }
}

/// Verifies an email and password with the identity provider and makes the resulting session
/// current.
#[derive(Clone)]
pub struct SessionAuthenticator {
    provider: Arc<dyn IdentityProvider>,
    session: SessionContext,
}

impl SessionAuthenticator {
    #[allow(missing_docs)]
    pub fn new(provider: Arc<dyn IdentityProvider>, session: SessionContext) -> Self {
        Self { provider, session }
    }

    /// Signs in with `identifier` and `secret`. On success the returned user is also the current
    /// session of the [`SessionContext`]. Failures are not retried.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<SessionUser, AuthError> {
        let user = self.verify(identifier, secret).await?;
        self.establish(user.clone());
        Ok(user)
    }

    /// Signs in with `identifier` and `secret` without touching the [`SessionContext`].
    pub async fn verify(&self, identifier: &str, secret: &str) -> Result<SessionUser, AuthError> {
        debug!("Authenticating with identity provider");
        self.provider
            .sign_in(identifier, secret)
            .await
            .map_err(AuthError::from)
    }

    /// Makes `user` the current session.
    pub fn establish(&self, user: SessionUser) {
        info!(uid = %user.uid, "Signed in");
        self.session.set(user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockIdentityProvider;

    #[tokio::test]
    async fn success_sets_current_session() {
        let provider = Arc::new(MockIdentityProvider::default().with_account("alice@example.com", "correct"));
        let session = SessionContext::default();
        let authenticator = SessionAuthenticator::new(provider.clone(), session.clone());

        let user = authenticator
            .authenticate("alice@example.com", "correct")
            .await
            .unwrap();

        assert_eq!(session.current().map(|u| u.uid), Some(user.uid));
        assert_eq!(
            provider.sign_in_calls(),
            vec![("alice@example.com".to_string(), "correct".to_string())]
        );
    }

    #[tokio::test]
    async fn rejection_keeps_provider_message() {
        let provider = Arc::new(MockIdentityProvider::default().with_account("alice@example.com", "correct"));
        let session = SessionContext::default();
        let authenticator = SessionAuthenticator::new(provider, session.clone());

        let err = authenticator
            .authenticate("alice@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Rejected(_)));
        assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn transport_failure_is_distinct_from_rejection() {
        let provider = Arc::new(MockIdentityProvider::default().unreachable());
        let authenticator = SessionAuthenticator::new(provider, SessionContext::default());

        let err = authenticator
            .authenticate("alice@example.com", "correct")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Transport(_)));
    }

    #[tokio::test]
    async fn verify_leaves_session_untouched() {
        let provider = Arc::new(MockIdentityProvider::default().with_account("alice@example.com", "correct"));
        let session = SessionContext::default();
        let authenticator = SessionAuthenticator::new(provider, session.clone());

        let user = authenticator
            .verify("alice@example.com", "correct")
            .await
            .unwrap();
        assert!(!session.is_authenticated());

        authenticator.establish(user);
        assert!(session.is_authenticated());
    }
}
