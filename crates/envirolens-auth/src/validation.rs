//! Validation rules shared by the login and registration forms.
//!
//! All functions are pure and never touch the network.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static USERNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,15}$").expect("Username regex is valid"));

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9a-z._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,64}$")
        .expect("Email regex is valid")
});

const RESERVED_USERNAMES: [&str; 4] = ["admin", "support", "help", "root"];

const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*(),.?":{}|<>"#;

/// Minimum number of characters of any password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Name must contain something other than whitespace.
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
}

/// 3 to 15 ASCII letters, digits or underscores.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Rejects reserved usernames, ignoring case.
pub fn is_username_allowed(username: &str) -> bool {
    !RESERVED_USERNAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(username))
}

#[allow(missing_docs)]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// At least [`MIN_PASSWORD_LENGTH`] characters.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
}

/// At least [`MIN_PASSWORD_LENGTH`] characters, with an uppercase letter, a lowercase letter, a
/// digit and one of the symbols `!@#$%^&*(),.?":{}|<>`.
pub fn is_strong_password(password: &str) -> bool {
    is_valid_password(password)
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

#[allow(missing_docs)]
pub fn passwords_match(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}

/// Input must contain something other than whitespace and newlines.
pub fn is_not_blank(input: &str) -> bool {
    !input.trim().is_empty()
}

/// A login form field that failed validation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[allow(missing_docs)]
    #[error("Please enter a valid username.")]
    InvalidUsername,
    #[allow(missing_docs)]
    #[error("Password cannot be empty.")]
    EmptyPassword,
}

/// Validates a login submission, reporting the username before the password.
pub fn validate_login(handle: &str, secret: &str) -> Result<(), ValidationError> {
    if !is_valid_username(handle) {
        return Err(ValidationError::InvalidUsername);
    }
    if secret.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}
