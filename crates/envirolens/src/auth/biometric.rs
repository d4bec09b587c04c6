use envirolens_auth::{BiometricError, BiometricPrompt};
use inquire::{Confirm, InquireError};

/// Stands in for a biometric sensor by asking the user at the terminal to confirm their
/// presence.
pub(crate) struct TerminalBiometricPrompt {
    interactive: bool,
}

impl TerminalBiometricPrompt {
    pub(crate) fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

#[async_trait::async_trait]
impl BiometricPrompt for TerminalBiometricPrompt {
    async fn can_evaluate(&self) -> Result<(), BiometricError> {
        if self.interactive {
            Ok(())
        } else {
            // Empty so the gate substitutes its generic message
            Err(BiometricError::Unavailable(String::new()))
        }
    }

    async fn evaluate(&self, reason: &str) -> Result<(), BiometricError> {
        match Confirm::new(reason).with_default(false).prompt() {
            Ok(true) => Ok(()),
            Ok(false) | Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Err(BiometricError::Failed(String::new()))
            }
            Err(e) => Err(BiometricError::Unavailable(e.to_string())),
        }
    }
}
