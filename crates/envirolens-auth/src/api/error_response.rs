use serde::Deserialize;

/// Error body returned by the identity toolkit and the document store.
///
/// ```json
/// { "error": { "code": 400, "message": "INVALID_LOGIN_CREDENTIALS", "status": "INVALID_ARGUMENT" } }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorApiResponse {
    pub error: ErrorDetailApiResponse,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct ErrorDetailApiResponse {
    #[serde(default)]
    pub code: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
