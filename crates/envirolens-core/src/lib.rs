#![doc = include_str!("../README.md")]

pub mod client;
mod error;
pub mod session;

pub use client::{Client, ClientSettings};
pub use error::{ApiError, MissingFieldError, NotAuthenticatedError};
pub use session::{SessionContext, SessionSummary, SessionUser};
