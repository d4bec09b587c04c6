use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the identity provider and document
/// store targeted by the EnviroLens Client. They are uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use envirolens_core::ClientSettings;
/// let settings = ClientSettings {
///     identity_url: "https://identitytoolkit.googleapis.com".to_string(),
///     firestore_url: "https://firestore.googleapis.com".to_string(),
///     api_key: "".to_string(),
///     project_id: "".to_string(),
///     user_agent: "EnviroLens Rust-SDK".to_string(),
///     client_version: None,
/// };
/// let default = ClientSettings::default();
/// assert_eq!(settings, default);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The identity toolkit base url. Defaults to `https://identitytoolkit.googleapis.com`
    pub identity_url: String,
    /// The document store base url. Defaults to `https://firestore.googleapis.com`
    pub firestore_url: String,
    /// The public web api key of the project, appended to identity toolkit requests.
    pub api_key: String,
    /// The project holding the `users` collection.
    pub project_id: String,
    /// The user_agent to send with every request. Defaults to `EnviroLens Rust-SDK`
    pub user_agent: String,
    /// Client version sent as the `X-Client-Version` header.
    pub client_version: Option<String>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            identity_url: "https://identitytoolkit.googleapis.com".into(),
            firestore_url: "https://firestore.googleapis.com".into(),
            api_key: String::new(),
            project_id: String::new(),
            user_agent: "EnviroLens Rust-SDK".into(),
            client_version: None,
        }
    }
}

impl ClientSettings {
    /// Base path of the documents in the default database of the configured project.
    pub fn documents_path(&self) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents",
            self.firestore_url.trim_end_matches('/'),
            self.project_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_settings_with_defaults() {
        let settings: ClientSettings = serde_json::from_str(
            r#"{"apiKey":"web-key","projectId":"envirolens-dev","clientVersion":"ios/1.4.0"}"#,
        )
        .unwrap();

        assert_eq!(settings.api_key, "web-key");
        assert_eq!(settings.project_id, "envirolens-dev");
        assert_eq!(settings.client_version.as_deref(), Some("ios/1.4.0"));
        assert_eq!(
            settings.identity_url,
            "https://identitytoolkit.googleapis.com"
        );
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = serde_json::from_str::<ClientSettings>(r#"{"apiUrl":"https://example.com"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn documents_path_ignores_trailing_slash() {
        let settings = ClientSettings {
            firestore_url: "http://127.0.0.1:8080/".into(),
            project_id: "demo".into(),
            ..Default::default()
        };

        assert_eq!(
            settings.documents_path(),
            "http://127.0.0.1:8080/v1/projects/demo/databases/(default)/documents"
        );
    }
}
