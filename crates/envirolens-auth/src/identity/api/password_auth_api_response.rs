use envirolens_core::{require, SessionUser};
use serde::Deserialize;

use crate::identity::IdentityProviderError;

/// Lifetime assumed when the provider does not say how long the id token is valid.
const DEFAULT_EXPIRES_IN_SECONDS: i64 = 3600;

/// Success body of the password authentication endpoints.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordAuthApiResponse {
    pub local_id: Option<String>,
    pub email: Option<String>,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Seconds, encoded as a string.
    pub expires_in: Option<String>,
}

impl TryFrom<PasswordAuthApiResponse> for SessionUser {
    type Error = IdentityProviderError;

    fn try_from(response: PasswordAuthApiResponse) -> Result<Self, Self::Error> {
        let expires_in = response
            .expires_in
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_EXPIRES_IN_SECONDS);

        Ok(SessionUser::new(
            require!(response.local_id),
            require!(response.email),
            require!(response.id_token),
            response.refresh_token.unwrap_or_default(),
            expires_in,
        ))
    }
}
