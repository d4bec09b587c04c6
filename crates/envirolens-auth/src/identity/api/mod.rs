mod password_auth_api_request;
mod password_auth_api_response;

pub(crate) use password_auth_api_request::PasswordAuthApiRequest;
pub(crate) use password_auth_api_response::PasswordAuthApiResponse;
