//! Password authentication against the remote identity provider.

mod api;
mod firebase;
mod provider;

pub use firebase::FirebaseIdentityProvider;
pub use provider::{IdentityProvider, IdentityProviderError};
