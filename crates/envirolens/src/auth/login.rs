use color_eyre::eyre::bail;
use envirolens_auth::{
    login::{CredentialCache, LoginOrchestrator, LoginOutcome, LoginPhase},
    AuthClientExt,
};
use envirolens_cli::{password_prompt_when_none, text_prompt_when_none};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::AuthContext;
use crate::render::{CommandOutput, CommandResult};

pub(crate) async fn login_password(
    context: AuthContext,
    username: Option<String>,
    password: Option<String>,
) -> CommandResult {
    let (username, password) = if context.interactive {
        (
            text_prompt_when_none("Username", username)?,
            password_prompt_when_none("Password", password)?,
        )
    } else {
        // Missing values are reported by the form validation
        (username.unwrap_or_default(), password.unwrap_or_default())
    };

    let login = orchestrator(&context);
    let phases = tokio::spawn(trace_phases(login.subscribe()));

    let result = login.submit(&username, &password).await;
    phases.abort();

    if let Some(notice) = login.form().notice {
        warn!("{notice}");
    }
    persist_and_render(&context, result?).await
}

pub(super) fn orchestrator(context: &AuthContext) -> LoginOrchestrator {
    context
        .client
        .auth_new()
        .login(context.vault.clone(), context.biometric_gate())
}

/// Persists the session of a successful attempt so later invocations run as the same user.
pub(super) async fn persist_and_render(
    context: &AuthContext,
    outcome: LoginOutcome,
) -> CommandResult {
    if matches!(outcome, LoginOutcome::Authenticated { .. }) {
        if let Err(e) = context.sessions.save(&context.client).await {
            warn!("Failed to save session, later commands will not be logged in: {e}");
        }
    }
    render_outcome(outcome)
}

/// Renders the session of a finished attempt.
fn render_outcome(outcome: LoginOutcome) -> CommandResult {
    match outcome {
        LoginOutcome::Authenticated {
            user,
            credential_cache,
        } => {
            match credential_cache {
                CredentialCache::Saved => info!("Credential saved for `unlock`"),
                CredentialCache::Failed(e) => debug!("Credential not saved: {e}"),
                CredentialCache::Unchanged => {}
            }
            info!(uid = %user.uid, "Successfully logged in!");
            Ok(CommandOutput::Object(Box::new(user.summary())))
        }
        LoginOutcome::Ignored | LoginOutcome::Superseded => {
            bail!("The login attempt was interrupted")
        }
    }
}

pub(super) async fn trace_phases(mut phases: watch::Receiver<LoginPhase>) {
    while phases.changed().await.is_ok() {
        let phase = phases.borrow_and_update().clone();
        debug!(?phase, "Login phase changed");
    }
}
