use zeroize::Zeroizing;

use super::RegistrationError;
use crate::{directory::Area, validation};

/// Values of the registration form.
#[allow(missing_docs)]
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub confirm_password: Zeroizing<String>,
    pub area: Option<Area>,
    pub accept_terms: bool,
}

impl RegisterForm {
    /// Checks every field, reporting the first failing rule in form order.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if !validation::is_valid_name(&self.name) {
            return Err(RegistrationError::EmptyName);
        }
        if !validation::is_valid_username(&self.username) {
            return Err(RegistrationError::InvalidUsername);
        }
        if !validation::is_username_allowed(&self.username) {
            return Err(RegistrationError::ReservedUsername);
        }
        if !validation::is_valid_email(&self.email) {
            return Err(RegistrationError::InvalidEmail);
        }
        if !validation::is_strong_password(&self.password) {
            return Err(RegistrationError::WeakPassword);
        }
        if !validation::passwords_match(&self.password, &self.confirm_password) {
            return Err(RegistrationError::PasswordMismatch);
        }
        if self.area.is_none() {
            return Err(RegistrationError::MissingArea);
        }
        if !self.accept_terms {
            return Err(RegistrationError::TermsNotAccepted);
        }
        Ok(())
    }
}

// We manually implement Debug to make sure we don't print the passwords
impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("name", &self.name)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("confirm_password", &"[REDACTED]")
            .field("area", &self.area)
            .field("accept_terms", &self.accept_terms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            name: "Shahein".into(),
            username: "shahein_1".into(),
            email: "shahein@example.com".into(),
            password: Zeroizing::new("Strong@123".into()),
            confirm_password: Zeroizing::new("Strong@123".into()),
            area: Some(Area::Colombo),
            accept_terms: true,
        }
    }

    fn message(form: RegisterForm) -> String {
        form.validate().unwrap_err().to_string()
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn each_rule_has_its_message() {
        assert_eq!(
            message(RegisterForm {
                name: "  ".into(),
                ..valid_form()
            }),
            "Name cannot be empty."
        );
        assert_eq!(
            message(RegisterForm {
                username: "ab".into(),
                ..valid_form()
            }),
            "Username must be 3–15 characters, alphanumeric or underscore."
        );
        assert_eq!(
            message(RegisterForm {
                username: "Admin".into(),
                ..valid_form()
            }),
            "This username is reserved. Please choose another."
        );
        assert_eq!(
            message(RegisterForm {
                email: "shahein.com".into(),
                ..valid_form()
            }),
            "Please enter a valid email address."
        );
        assert_eq!(
            message(RegisterForm {
                password: Zeroizing::new("weakpass".into()),
                confirm_password: Zeroizing::new("weakpass".into()),
                ..valid_form()
            }),
            "Password must be 8+ chars, include upper/lowercase, number & special char."
        );
        assert_eq!(
            message(RegisterForm {
                confirm_password: Zeroizing::new("Strong@124".into()),
                ..valid_form()
            }),
            "Passwords do not match."
        );
        assert_eq!(
            message(RegisterForm {
                area: None,
                ..valid_form()
            }),
            "Please select an area."
        );
        assert_eq!(
            message(RegisterForm {
                accept_terms: false,
                ..valid_form()
            }),
            "You must accept the terms and privacy policy."
        );
    }

    #[test]
    fn first_failing_rule_is_reported() {
        let form = RegisterForm {
            email: "not-an-email".into(),
            accept_terms: false,
            ..valid_form()
        };

        assert!(matches!(
            form.validate(),
            Err(RegistrationError::InvalidEmail)
        ));
    }

    #[test]
    fn debug_redacts_passwords() {
        assert!(!format!("{:?}", valid_form()).contains("Strong@123"));
    }
}
