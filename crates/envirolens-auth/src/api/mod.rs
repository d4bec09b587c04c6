mod error_response;
mod read_response;

pub(crate) use error_response::ErrorApiResponse;
pub(crate) use read_response::{read_response, ResponseError};
