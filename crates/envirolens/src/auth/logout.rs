use envirolens_auth::AuthClientExt;
use envirolens_core::NotAuthenticatedError;
use tracing::info;

use super::AuthContext;
use crate::render::CommandResult;

pub(crate) async fn logout(context: AuthContext, forget: bool) -> CommandResult {
    if !context.client.session().is_authenticated() {
        return Err(NotAuthenticatedError.into());
    }

    let vault = forget.then_some(&context.vault);
    context.client.auth_new().sign_out(vault).await;
    context.sessions.clear().await?;

    if forget {
        info!("Cached credential removed");
    }
    Ok("Logged out successfully".into())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use envirolens_core::{Client, SessionUser};
    use envirolens_vault::MemorySecureStorage;

    use super::*;

    async fn context(storage: MemorySecureStorage) -> AuthContext {
        AuthContext::restore(Client::new(None), Arc::new(storage), false).await
    }

    #[tokio::test]
    async fn logout_without_session_fails() {
        let err = logout(context(MemorySecureStorage::default()).await, false)
            .await
            .err()
            .unwrap();

        assert!(err.downcast_ref::<NotAuthenticatedError>().is_some());
    }

    #[tokio::test]
    async fn logout_clears_persisted_session() {
        let storage = MemorySecureStorage::default();
        let first = context(storage.clone()).await;
        first.client.session().set(SessionUser::new(
            "uid-alice",
            "alice@example.com",
            "id",
            "refresh",
            3600,
        ));
        first.sessions.save(&first.client).await.unwrap();
        first.vault.save("alice@example.com", "correct").await.unwrap();

        let second = context(storage.clone()).await;
        assert!(second.client.session().is_authenticated());
        let vault = second.vault.clone();
        assert!(logout(second, true).await.is_ok());

        let third = context(storage).await;
        assert!(!third.client.session().is_authenticated());
        assert!(vault.retrieve().await.is_none());
    }

    #[tokio::test]
    async fn logout_keeps_cached_credential_unless_forgotten() {
        let storage = MemorySecureStorage::default();
        let context = context(storage).await;
        context.client.session().set(SessionUser::new(
            "uid-alice",
            "alice@example.com",
            "id",
            "refresh",
            3600,
        ));
        context.vault.save("alice@example.com", "correct").await.unwrap();
        let vault = context.vault.clone();

        assert!(logout(context, false).await.is_ok());

        assert!(vault.retrieve().await.is_some());
    }
}
