use envirolens_core::ApiError;
use serde::de::DeserializeOwned;

use super::ErrorApiResponse;

/// Failure of a request to one of the remote services.
#[derive(Debug)]
pub(crate) enum ResponseError {
    /// The service answered with an error body, `message` is its description.
    Rejected { message: String },
    /// The request did not complete or the response could not be understood.
    Api(ApiError),
}

impl From<reqwest::Error> for ResponseError {
    fn from(error: reqwest::Error) -> Self {
        Self::Api(error.into())
    }
}

/// Deserializes a successful response into `T`, or the service error body into
/// [`ResponseError::Rejected`].
///
/// Error responses without a recognizable body are reported as
/// [`ApiError::ResponseContent`].
pub(crate) async fn read_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ResponseError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let content = response.text().await?;
    match serde_json::from_str::<ErrorApiResponse>(&content) {
        Ok(body) => Err(ResponseError::Rejected {
            message: body.error.message,
        }),
        Err(_) => Err(ResponseError::Api(ApiError::ResponseContent {
            status,
            message: content,
        })),
    }
}
