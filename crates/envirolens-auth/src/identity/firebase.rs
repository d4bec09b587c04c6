use envirolens_core::{Client, SessionUser};
use tracing::debug;

use super::{
    api::{PasswordAuthApiRequest, PasswordAuthApiResponse},
    IdentityProvider, IdentityProviderError,
};
use crate::api::read_response;

/// [`IdentityProvider`] talking to the identity toolkit REST api.
#[derive(Clone)]
pub struct FirebaseIdentityProvider {
    http_client: reqwest::Client,
    identity_url: String,
    api_key: String,
}

impl FirebaseIdentityProvider {
    /// Creates a provider using the http client and settings of `client`.
    pub fn new(client: &Client) -> Self {
        let settings = client.settings();
        Self {
            http_client: client.internal.http_client().clone(),
            identity_url: settings.identity_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        }
    }

    async fn send_password_request(
        &self,
        endpoint: &str,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError> {
        debug!(endpoint, "Sending password request to identity toolkit");
        let url = format!("{}/v1/accounts:{endpoint}", self.identity_url);

        let response = self
            .http_client
            .post(url)
            .query(&[("key", &self.api_key)])
            .header(reqwest::header::ACCEPT, "application/json")
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .json(&PasswordAuthApiRequest::new(email, secret))
            .send()
            .await
            .map_err(envirolens_core::ApiError::from)?;

        let response: PasswordAuthApiResponse = read_response(response).await?;
        response.try_into()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_account(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError> {
        self.send_password_request("signUp", email, secret).await
    }

    async fn sign_in(
        &self,
        email: &str,
        secret: &str,
    ) -> Result<SessionUser, IdentityProviderError> {
        self.send_password_request("signInWithPassword", email, secret)
            .await
    }

    async fn sign_out(&self) -> Result<(), IdentityProviderError> {
        // Id tokens are stateless, signing out only drops them locally.
        Ok(())
    }
}

impl std::fmt::Debug for FirebaseIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseIdentityProvider")
            .field("identity_url", &self.identity_url)
            .finish_non_exhaustive()
    }
}
