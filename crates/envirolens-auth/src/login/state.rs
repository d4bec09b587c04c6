use envirolens_core::SessionUser;
use zeroize::Zeroizing;

use crate::validation::{is_valid_username, ValidationError};

/// Phase of the [`LoginOrchestrator`](super::LoginOrchestrator).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoginPhase {
    /// Nothing submitted yet, or the orchestrator was reset.
    #[default]
    Idle,
    #[allow(missing_docs)]
    Validating,
    /// Looking up the email registered for the username.
    ResolvingHandle,
    /// Verifying the credential with the identity provider.
    Authenticating,
    /// Waiting for the biometric prompt.
    BiometricChallenge,
    /// A session is current. Only reached through a successful authentication.
    Success,
    /// The last attempt failed with the contained user-facing message. New submissions are
    /// accepted.
    Failed(String),
}

impl LoginPhase {
    /// Whether a new submission starts an attempt in this phase.
    pub fn accepts_submit(&self) -> bool {
        matches!(self, Self::Idle | Self::Success | Self::Failed(_))
    }
}

/// Values and feedback of the login form.
#[derive(Clone, Default)]
pub struct LoginFormState {
    /// The username as typed.
    pub handle: String,
    secret: Zeroizing<String>,
    /// Whether the user submitted at least once. Field errors are only shown afterwards.
    pub attempted: bool,
    /// Whether an attempt is in flight.
    pub loading: bool,
    /// Message of the last failed attempt.
    pub error_message: Option<String>,
    /// Non-fatal message about the last successful attempt.
    pub notice: Option<String>,
}

impl LoginFormState {
    /// The password as typed.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub(crate) fn set_secret(&mut self, secret: &str) {
        self.secret = Zeroizing::new(secret.to_owned());
    }

    /// Field errors to show under the inputs, empty until the first submission.
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if !self.attempted {
            return errors;
        }
        if !is_valid_username(&self.handle) {
            errors.push(ValidationError::InvalidUsername);
        }
        if self.secret.is_empty() {
            errors.push(ValidationError::EmptyPassword);
        }
        errors
    }

    /// Whether the submit button should be enabled.
    pub fn is_submittable(&self) -> bool {
        !self.loading && is_valid_username(&self.handle) && !self.secret.is_empty()
    }
}

// We manually implement Debug to make sure we don't print the password
impl std::fmt::Debug for LoginFormState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginFormState")
            .field("handle", &self.handle)
            .field("secret", &"[REDACTED]")
            .field("attempted", &self.attempted)
            .field("loading", &self.loading)
            .field("error_message", &self.error_message)
            .field("notice", &self.notice)
            .finish()
    }
}

/// Whether the credential was cached for biometric login after a successful attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialCache {
    /// The credential used for this login replaced the cached one.
    Saved,
    /// Caching failed. Contains the storage error.
    Failed(String),
    /// Nothing was written, the login replayed the cached credential.
    Unchanged,
}

/// Result of a submission that did not fail.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// The user is signed in.
    Authenticated {
        #[allow(missing_docs)]
        user: SessionUser,
        #[allow(missing_docs)]
        credential_cache: CredentialCache,
    },
    /// Another attempt was in flight or the orchestrator was torn down. Nothing happened.
    Ignored,
    /// The orchestrator was reset or torn down while this attempt was in flight. Its result was
    /// discarded.
    Superseded,
}
