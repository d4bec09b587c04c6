use envirolens_core::ClientSettings;

/// Api key the mocked endpoints expect in the `key` query parameter.
pub const TEST_API_KEY: &str = "test-api-key";

/// Project id used for the mocked document store paths.
pub const TEST_PROJECT_ID: &str = "envirolens-test";

/// Helper for testing the identity toolkit and document store adapters using wiremock.
///
/// Both services are served by the same mock server.
///
/// Warning: when using `Mock::expected` ensure `server` is not dropped before the test completes,
pub async fn start_api_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, ClientSettings) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let settings = ClientSettings {
        identity_url: server.uri(),
        firestore_url: server.uri(),
        api_key: TEST_API_KEY.to_string(),
        project_id: TEST_PROJECT_ID.to_string(),
        user_agent: "EnviroLens Rust-SDK [TEST]".to_string(),
        client_version: None,
    };

    (server, settings)
}

/// Path of the document store `runQuery` endpoint for the test project.
pub fn run_query_path() -> String {
    format!("/v1/projects/{TEST_PROJECT_ID}/databases/(default)/documents:runQuery")
}

/// Path of the profile document of `uid` for the test project.
pub fn user_document_path(uid: &str) -> String {
    format!("/v1/projects/{TEST_PROJECT_ID}/databases/(default)/documents/users/{uid}")
}
