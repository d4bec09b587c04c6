use serde::Serialize;

/// Body of the `accounts:signInWithPassword` and `accounts:signUp` requests.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PasswordAuthApiRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub return_secure_token: bool,
}

impl<'a> PasswordAuthApiRequest<'a> {
    pub(crate) fn new(email: &'a str, password: &'a str) -> Self {
        Self {
            email,
            password,
            return_secure_token: true,
        }
    }
}

// We manually implement Debug to make sure we don't print the password
impl std::fmt::Debug for PasswordAuthApiRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordAuthApiRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("return_secure_token", &self.return_secure_token)
            .finish()
    }
}
