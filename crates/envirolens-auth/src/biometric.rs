//! Biometric verification as a pass/fail gate.
//!
//! The gate knows nothing about credentials. The login flow decides what a passed challenge
//! unlocks.

use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::debug;

/// Localized reason shown by the platform prompt unless configured otherwise.
pub const DEFAULT_BIOMETRIC_REASON: &str = "Authenticate with Face ID";

const UNAVAILABLE_MESSAGE: &str = "Biometric authentication not available.";
const FAILED_MESSAGE: &str = "Biometric authentication failed.";

/// Errors reported by a biometric challenge. Messages come from the platform and are shown to the
/// user as they are.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BiometricError {
    /// The device has no biometric capability or nothing is enrolled.
    #[error("{0}")]
    Unavailable(String),
    /// The user canceled or the biometric did not match.
    #[error("{0}")]
    Failed(String),
    /// Another challenge is being evaluated.
    #[error("Biometric authentication is already in progress.")]
    InProgress,
}

impl BiometricError {
    /// Replaces an empty platform message with a generic one.
    fn with_default_message(self) -> Self {
        match self {
            Self::Unavailable(message) if message.trim().is_empty() => {
                Self::Unavailable(UNAVAILABLE_MESSAGE.to_string())
            }
            Self::Failed(message) if message.trim().is_empty() => {
                Self::Failed(FAILED_MESSAGE.to_string())
            }
            other => other,
        }
    }
}

/// The platform biometric prompt.
#[async_trait::async_trait]
pub trait BiometricPrompt: Send + Sync {
    /// Whether the device can evaluate a biometric challenge right now.
    async fn can_evaluate(&self) -> Result<(), BiometricError>;

    /// Shows the prompt with `reason` and waits for the user.
    async fn evaluate(&self, reason: &str) -> Result<(), BiometricError>;
}

/// Where a [`BiometricGate`] is in its challenge.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BiometricState {
    #[default]
    Idle,
    Evaluating,
    Authenticated,
    Failed,
}

/// Wraps a [`BiometricPrompt`] into a pass/fail signal.
///
/// There is no timeout, a challenge lasts as long as the platform prompt.
#[derive(Clone)]
pub struct BiometricGate {
    prompt: Arc<dyn BiometricPrompt>,
    reason: String,
    state: Arc<Mutex<BiometricState>>,
}

impl BiometricGate {
    /// Creates a gate prompting with [`DEFAULT_BIOMETRIC_REASON`].
    pub fn new(prompt: Arc<dyn BiometricPrompt>) -> Self {
        Self::with_reason(prompt, DEFAULT_BIOMETRIC_REASON)
    }

    #[allow(missing_docs)]
    pub fn with_reason(prompt: Arc<dyn BiometricPrompt>, reason: impl Into<String>) -> Self {
        Self {
            prompt,
            reason: reason.into(),
            state: Arc::new(Mutex::new(BiometricState::Idle)),
        }
    }

    #[allow(missing_docs)]
    pub fn state(&self) -> BiometricState {
        *self.state.lock().expect("Mutex is not poisoned")
    }

    /// Runs one challenge.
    ///
    /// Fails with [`BiometricError::InProgress`] while another challenge is evaluating. A
    /// challenge started after an earlier one finished always evaluates again.
    pub async fn challenge(&self) -> Result<(), BiometricError> {
        let mut evaluation = Evaluation::start(&self.state)?;

        let result = match self.prompt.can_evaluate().await {
            Ok(()) => {
                debug!("Evaluating biometric challenge");
                self.prompt.evaluate(&self.reason).await
            }
            Err(e) => Err(e),
        }
        .map_err(BiometricError::with_default_message);

        evaluation.finish(match result {
            Ok(()) => BiometricState::Authenticated,
            Err(_) => BiometricState::Failed,
        });
        result
    }
}

impl std::fmt::Debug for BiometricGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiometricGate")
            .field("reason", &self.reason)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Marks the gate as evaluating. Dropping it before [`Evaluation::finish`] (the challenge future
/// was dropped) returns the gate to idle.
struct Evaluation<'a> {
    state: &'a Mutex<BiometricState>,
    finished: bool,
}

impl<'a> Evaluation<'a> {
    fn start(state: &'a Mutex<BiometricState>) -> Result<Self, BiometricError> {
        let mut current = state.lock().expect("Mutex is not poisoned");
        if *current == BiometricState::Evaluating {
            return Err(BiometricError::InProgress);
        }
        *current = BiometricState::Evaluating;

        Ok(Self {
            state,
            finished: false,
        })
    }

    fn finish(&mut self, outcome: BiometricState) {
        *self.state.lock().expect("Mutex is not poisoned") = outcome;
        self.finished = true;
    }
}

impl Drop for Evaluation<'_> {
    fn drop(&mut self) {
        if !self.finished {
            if let Ok(mut state) = self.state.lock() {
                *state = BiometricState::Idle;
            }
        }
    }
}
