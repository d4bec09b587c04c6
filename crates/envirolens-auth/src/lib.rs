#![doc = include_str!("../README.md")]

mod auth_client;
mod authenticator;
mod biometric;
mod resolver;

pub(crate) mod api; // keep internal to crate

pub mod directory;
pub mod identity;
pub mod login;
pub mod registration;
pub mod validation;

#[cfg(test)]
mod test_utils;

pub use auth_client::{AuthClient, AuthClientExt};
pub use authenticator::{AuthError, SessionAuthenticator};
pub use biometric::{
    BiometricError, BiometricGate, BiometricPrompt, BiometricState, DEFAULT_BIOMETRIC_REASON,
};
pub use resolver::{IdentityResolver, ResolveError};
