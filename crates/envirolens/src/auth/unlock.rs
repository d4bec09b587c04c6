use super::{
    login::{orchestrator, persist_and_render, trace_phases},
    AuthContext,
};
use crate::render::CommandResult;

/// Logs in with the credential cached by the last password login once the user confirms their
/// presence.
pub(crate) async fn unlock(context: AuthContext) -> CommandResult {
    let login = orchestrator(&context);
    let phases = tokio::spawn(trace_phases(login.subscribe()));

    let result = login.submit_biometric().await;
    phases.abort();

    persist_and_render(&context, result?).await
}
