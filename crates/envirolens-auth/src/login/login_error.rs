use thiserror::Error;

use crate::{validation::ValidationError, AuthError, BiometricError, ResolveError};

/// Why a login attempt failed. `Display` is the message shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[allow(missing_docs)]
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[allow(missing_docs)]
    #[error("Username not found.")]
    UsernameNotFound,
    /// The identity provider refused the credential, with its description.
    #[error("{0}")]
    Rejected(String),
    /// A remote service could not be reached. `detail` is logged, never shown.
    #[error("Unable to connect. Please check your connection and try again.")]
    Transport {
        #[allow(missing_docs)]
        detail: String,
    },
    #[allow(missing_docs)]
    #[error(transparent)]
    Biometric(#[from] BiometricError),
    /// Biometric login passed but nothing was cached, or the cache could not be read.
    #[error("No saved credentials found.")]
    NoSavedCredentials,
}

impl From<ResolveError> for LoginError {
    fn from(error: ResolveError) -> Self {
        match error {
            ResolveError::NotFound => LoginError::UsernameNotFound,
            ResolveError::Transport(e) => LoginError::Transport {
                detail: e.to_string(),
            },
        }
    }
}

impl From<AuthError> for LoginError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected(message) => LoginError::Rejected(message),
            AuthError::Transport(e) => LoginError::Transport {
                detail: e.to_string(),
            },
        }
    }
}
