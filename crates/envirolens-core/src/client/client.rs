use std::sync::Arc;

use reqwest::header::{self, HeaderValue};

use super::internal::InternalClient;
use crate::{client::client_settings::ClientSettings, session::SessionContext};

/// The main struct to interact with the EnviroLens SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance. Every clone observes the same `SessionContext`, so any
    // mutable state needs to live behind the `Arc`.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new EnviroLens client. Uses [`ClientSettings::default`] when no settings are
    /// provided.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        let settings = settings.unwrap_or_default();

        let headers = build_default_headers(&settings);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("HTTP Client build should not fail");

        Self {
            internal: Arc::new(InternalClient {
                settings,
                http_client,
                session: SessionContext::default(),
            }),
        }
    }

    /// The settings this client was created with.
    pub fn settings(&self) -> &ClientSettings {
        self.internal.settings()
    }

    /// The session context shared by every clone of this client.
    pub fn session(&self) -> &SessionContext {
        self.internal.session()
    }
}

/// Build default headers for the EnviroLens HttpClient
fn build_default_headers(settings: &ClientSettings) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    if let Some(version) = &settings.client_version {
        headers.append(
            "X-Client-Version",
            HeaderValue::from_str(version).expect("Version should be a valid header value"),
        );
    }

    headers.append(
        header::USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .expect("User agent should be a valid header value"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SessionUser;

    #[test]
    fn default_headers_include_client_version() {
        let settings = ClientSettings {
            client_version: Some("cli/0.3.0".into()),
            ..Default::default()
        };

        let headers = build_default_headers(&settings);

        assert_eq!(headers["X-Client-Version"], "cli/0.3.0");
        assert_eq!(headers[header::USER_AGENT], "EnviroLens Rust-SDK");
    }

    #[test]
    fn clones_share_the_session() {
        let client = Client::new(None);
        let clone = client.clone();

        client
            .session()
            .set(SessionUser::new("uid-1", "alice@example.com", "id", "refresh", 3600));

        assert_eq!(
            clone.session().current().map(|u| u.uid),
            Some("uid-1".to_string())
        );
    }
}
