//! The login state machine.

mod login_error;
mod orchestrator;
mod state;

pub use login_error::LoginError;
pub use orchestrator::LoginOrchestrator;
pub use state::{CredentialCache, LoginFormState, LoginOutcome, LoginPhase};
