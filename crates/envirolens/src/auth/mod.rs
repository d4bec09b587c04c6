use std::sync::Arc;

use clap::Args;
use envirolens_auth::{directory::Area, BiometricGate};
use envirolens_core::Client;
use envirolens_vault::{CredentialVault, KeyringSecureStorage, SecureStorage};

use crate::render::CommandResult;

mod biometric;
mod login;
mod register;

pub(crate) mod logout;
pub(crate) mod state;
pub(crate) mod unlock;

pub(crate) use biometric::TerminalBiometricPrompt;
use state::SessionStore;

#[derive(Args, Clone)]
pub struct LoginArgs {
    #[arg(short = 'u', long, help = "Username")]
    pub username: Option<String>,

    #[arg(
        short = 'p',
        long,
        env = "ENVIROLENS_PASSWORD",
        hide_env_values = true,
        help = "Password, prompted for when omitted"
    )]
    pub password: Option<String>,
}

impl LoginArgs {
    pub async fn run(self, context: AuthContext) -> CommandResult {
        login::login_password(context, self.username, self.password).await
    }
}

#[derive(Args, Clone)]
pub struct RegisterArgs {
    #[arg(short = 'n', long, help = "Full name")]
    pub name: Option<String>,

    #[arg(short = 'u', long, help = "Username, 3 to 15 letters, digits or underscores")]
    pub username: Option<String>,

    #[arg(short = 'e', long, help = "Email address")]
    pub email: Option<String>,

    #[arg(
        short = 'p',
        long,
        env = "ENVIROLENS_PASSWORD",
        hide_env_values = true,
        help = "Password, prompted for with confirmation when omitted"
    )]
    pub password: Option<String>,

    #[arg(short = 'a', long, help = "Service area")]
    pub area: Option<Area>,

    #[arg(long, help = "Accept the terms and privacy policy")]
    pub accept_terms: bool,
}

impl RegisterArgs {
    pub async fn run(self, context: AuthContext) -> CommandResult {
        register::register(context, self).await
    }
}

/// What the account commands share: the client with the restored session, the session store and
/// the credential cache of the selected profile.
pub struct AuthContext {
    pub client: Client,
    pub sessions: SessionStore,
    pub vault: CredentialVault,
    pub interactive: bool,
}

impl AuthContext {
    /// Builds the context on top of `storage` and restores the session persisted there.
    pub(crate) async fn restore(
        client: Client,
        storage: Arc<dyn SecureStorage>,
        interactive: bool,
    ) -> Self {
        let sessions = SessionStore::new(storage.clone());
        sessions.restore(&client).await;

        Self {
            client,
            sessions,
            vault: CredentialVault::new(storage),
            interactive,
        }
    }

    pub(crate) fn biometric_gate(&self) -> BiometricGate {
        BiometricGate::new(Arc::new(TerminalBiometricPrompt::new(self.interactive)))
    }
}

/// OS keyring entries owned by `profile`.
pub(crate) fn keyring_storage(profile: &str) -> Arc<dyn SecureStorage> {
    Arc::new(KeyringSecureStorage::new(profile))
}
