use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// An account identifier and the plaintext secret that authenticates it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Canonical account identifier, usually an email address.
    pub identifier: String,
    secret: Zeroizing<String>,
}

impl Credential {
    #[allow(missing_docs)]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }

    #[allow(missing_docs)]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// We manually implement Debug to make sure we don't print the secret
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
