use chrono::{DateTime, Utc};
use envirolens_core::{ApiError, SessionUser};
use thiserror::Error;

use super::Area;
use crate::api::ResponseError;

/// A user document matching a directory lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Document id, equal to the account uid.
    pub id: String,
    #[allow(missing_docs)]
    pub username: String,
    /// Canonical account identifier. Documents written by older clients may lack it.
    pub email: Option<String>,
}

/// Profile fields stored for every registered user.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub username: String,
    pub email: String,
    pub area: Area,
    pub created_at: DateTime<Utc>,
}

/// Errors reported by a [`UserDocumentStore`].
#[derive(Debug, Error)]
pub enum DocumentStoreError {
    /// The store refused the request, `message` is its own description.
    #[error("{message}")]
    Rejected {
        #[allow(missing_docs)]
        message: String,
    },
    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ResponseError> for DocumentStoreError {
    fn from(error: ResponseError) -> Self {
        match error {
            ResponseError::Rejected { message } => Self::Rejected { message },
            ResponseError::Api(e) => Self::Api(e),
        }
    }
}

/// Remote document store holding one profile document per user in the `users` collection.
#[async_trait::async_trait]
pub trait UserDocumentStore: Send + Sync {
    /// Returns the user documents whose `username` equals `username`, in the order the store
    /// returns them.
    async fn find_by_username(&self, username: &str)
        -> Result<Vec<UserRecord>, DocumentStoreError>;

    /// Writes the profile document of `user`, authenticated as that user.
    async fn create_user(
        &self,
        user: &SessionUser,
        profile: &UserProfile,
    ) -> Result<(), DocumentStoreError>;
}
