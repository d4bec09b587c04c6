//! Account creation.
//!
//! Registration checks the form, makes sure the username is free, creates the account with the
//! identity provider and stores the profile document before the new session becomes current.

mod register_form;
mod registration_client;
mod registration_error;

pub use register_form::RegisterForm;
pub use registration_client::RegistrationClient;
pub use registration_error::RegistrationError;
