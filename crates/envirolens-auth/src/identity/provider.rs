use envirolens_core::{ApiError, MissingFieldError, SessionUser};
use thiserror::Error;

use crate::api::ResponseError;

/// Errors reported by an [`IdentityProvider`].
#[derive(Debug, Error)]
pub enum IdentityProviderError {
    /// The provider refused the request. `message` is the provider's own description and is shown
    /// to the user unchanged.
    #[error("{message}")]
    Rejected {
        #[allow(missing_docs)]
        message: String,
    },
    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] ApiError),
    #[allow(missing_docs)]
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
}

impl From<ResponseError> for IdentityProviderError {
    fn from(error: ResponseError) -> Self {
        match error {
            ResponseError::Rejected { message } => Self::Rejected { message },
            ResponseError::Api(e) => Self::Api(e),
        }
    }
}

/// Remote identity provider verifying email and password pairs.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Creates an account and signs it in.
    async fn create_account(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError>;

    /// Verifies the pair and issues a session for it.
    async fn sign_in(&self, email: &str, secret: &str)
        -> Result<SessionUser, IdentityProviderError>;

    /// Ends the provider side of the current session.
    async fn sign_out(&self) -> Result<(), IdentityProviderError>;
}
