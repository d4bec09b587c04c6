use thiserror::Error;

use crate::{directory::DocumentStoreError, identity::IdentityProviderError};

/// Why a registration failed. `Display` is the message shown to the user.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Name cannot be empty.")]
    EmptyName,
    #[error("Username must be 3–15 characters, alphanumeric or underscore.")]
    InvalidUsername,
    #[error("This username is reserved. Please choose another.")]
    ReservedUsername,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be 8+ chars, include upper/lowercase, number & special char.")]
    WeakPassword,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Please select an area.")]
    MissingArea,
    #[error("You must accept the terms and privacy policy.")]
    TermsNotAccepted,

    #[error("Username already taken.")]
    UsernameTaken,
    #[error("Failed to check username: {0}")]
    UsernameLookup(DocumentStoreError),
    #[error("Failed to register: {0}")]
    AccountCreation(IdentityProviderError),
    #[error("User ID could not be retrieved.")]
    MissingUserId,
    #[error("Failed to save user data: {0}")]
    ProfileWrite(DocumentStoreError),

    /// Another registration of the same client is in flight.
    #[error("A registration is already in progress.")]
    InProgress,
}

impl RegistrationError {
    /// Whether the error concerns the form itself and was found without any remote call.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyName
                | Self::InvalidUsername
                | Self::ReservedUsername
                | Self::InvalidEmail
                | Self::WeakPassword
                | Self::PasswordMismatch
                | Self::MissingArea
                | Self::TermsNotAccepted
        )
    }
}
