//! Integration tests for the login flow against mocked remote services

use std::sync::Arc;

use envirolens_auth::{
    login::{CredentialCache, LoginError, LoginOutcome, LoginPhase},
    AuthClientExt, BiometricError, BiometricGate, BiometricPrompt,
};
use envirolens_core::Client;
use envirolens_test::{run_query_path, start_api_mock, TEST_API_KEY};
use envirolens_vault::{CredentialVault, MemorySecureStorage};
use wiremock::{matchers, Mock, ResponseTemplate};

struct ApprovingPrompt;

#[async_trait::async_trait]
impl BiometricPrompt for ApprovingPrompt {
    async fn can_evaluate(&self) -> Result<(), BiometricError> {
        Ok(())
    }

    async fn evaluate(&self, _reason: &str) -> Result<(), BiometricError> {
        Ok(())
    }
}

fn alice_lookup() -> Mock {
    Mock::given(matchers::method("POST"))
        .and(matchers::path(run_query_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
            "document": {
                "name": "projects/envirolens-test/databases/(default)/documents/users/uid-alice",
                "fields": {
                    "username": { "stringValue": "alice" },
                    "email": { "stringValue": "alice@example.com" }
                }
            },
            "readTime": "2025-04-15T10:00:00.000000Z"
        }])))
}

fn alice_sign_in() -> Mock {
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/accounts:signInWithPassword"))
        .and(matchers::query_param("key", TEST_API_KEY))
        .and(matchers::body_partial_json(serde_json::json!({
            "email": "alice@example.com",
            "password": "correct"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "localId": "uid-alice",
            "email": "alice@example.com",
            "idToken": "id-token",
            "refreshToken": "refresh-token",
            "expiresIn": "3600"
        })))
}

#[tokio::test]
async fn password_login_then_biometric_unlock() {
    let (_server, settings) = start_api_mock(vec![
        alice_lookup().expect(1),
        alice_sign_in().expect(2),
    ])
    .await;
    let client = Client::new(Some(settings));
    let auth = client.auth_new();
    let vault = CredentialVault::new(Arc::new(MemorySecureStorage::default()));
    let login = auth.login(vault.clone(), BiometricGate::new(Arc::new(ApprovingPrompt)));

    let outcome = login.submit("alice", "correct").await.unwrap();
    assert!(matches!(
        outcome,
        LoginOutcome::Authenticated {
            credential_cache: CredentialCache::Saved,
            ..
        }
    ));
    assert_eq!(login.phase(), LoginPhase::Success);
    assert_eq!(
        client.session().current().map(|u| u.uid),
        Some("uid-alice".to_string())
    );

    auth.sign_out(None).await;
    assert!(!client.session().is_authenticated());

    let outcome = login.submit_biometric().await.unwrap();
    assert!(matches!(outcome, LoginOutcome::Authenticated { .. }));
    assert!(client.session().is_authenticated());
}

#[tokio::test]
async fn unknown_username_never_signs_in() {
    let (_server, settings) = start_api_mock(vec![
        Mock::given(matchers::method("POST"))
            .and(matchers::path(run_query_path()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "readTime": "2025-04-15T10:00:00Z" }])),
            ),
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0),
    ])
    .await;
    let auth = Client::new(Some(settings)).auth_new();
    let login = auth.login(
        CredentialVault::new(Arc::new(MemorySecureStorage::default())),
        BiometricGate::new(Arc::new(ApprovingPrompt)),
    );

    let err = login.submit("ghost", "anypass").await.unwrap_err();

    assert_eq!(err, LoginError::UsernameNotFound);
    assert_eq!(
        login.form().error_message.as_deref(),
        Some("Username not found.")
    );
}

#[tokio::test]
async fn wrong_password_shows_provider_message() {
    let (_server, settings) = start_api_mock(vec![
        alice_lookup(),
        Mock::given(matchers::method("POST"))
            .and(matchers::path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS" }
            }))),
    ])
    .await;
    let auth = Client::new(Some(settings)).auth_new();
    let vault = CredentialVault::new(Arc::new(MemorySecureStorage::default()));
    let login = auth.login(vault.clone(), BiometricGate::new(Arc::new(ApprovingPrompt)));

    let err = login.submit("alice", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "INVALID_LOGIN_CREDENTIALS");
    assert!(vault.retrieve().await.is_none());
}
