use envirolens_core::{ApiError, Client, SessionUser};
use serde::de::IgnoredAny;
use tracing::debug;

use super::{
    api::{RunQueryApiRequest, RunQueryApiResponse, UserDocumentApiModel, UserFieldsApiModel},
    DocumentStoreError, UserDocumentStore, UserProfile, UserRecord,
};
use crate::api::read_response;

const USERS_COLLECTION: &str = "users";

/// [`UserDocumentStore`] talking to the document database REST api.
#[derive(Clone)]
pub struct FirestoreDocumentStore {
    http_client: reqwest::Client,
    documents_path: String,
    api_key: String,
}

impl FirestoreDocumentStore {
    /// Creates a store using the http client and settings of `client`.
    pub fn new(client: &Client) -> Self {
        let settings = client.settings();
        Self {
            http_client: client.internal.http_client().clone(),
            documents_path: settings.documents_path(),
            api_key: settings.api_key.clone(),
        }
    }
}

#[async_trait::async_trait]
impl UserDocumentStore for FirestoreDocumentStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<UserRecord>, DocumentStoreError> {
        debug!(username, "Querying users by username");
        let url = format!("{}:runQuery", self.documents_path);

        let response = self
            .http_client
            .post(url)
            .query(&[("key", &self.api_key)])
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&RunQueryApiRequest::field_equals(
                USERS_COLLECTION,
                "username",
                username,
            ))
            .send()
            .await
            .map_err(ApiError::from)?;

        let results: Vec<RunQueryApiResponse> = read_response(response).await?;

        Ok(results
            .into_iter()
            .filter_map(|result| result.document)
            .map(UserRecord::from)
            .collect())
    }

    async fn create_user(
        &self,
        user: &SessionUser,
        profile: &UserProfile,
    ) -> Result<(), DocumentStoreError> {
        debug!(uid = %user.uid, "Writing user profile");
        let url = format!("{}/{USERS_COLLECTION}/{}", self.documents_path, user.uid);

        let document = UserDocumentApiModel {
            name: String::new(),
            fields: UserFieldsApiModel::from(profile),
        };

        let response = self
            .http_client
            .patch(url)
            .query(&[("key", &self.api_key)])
            .bearer_auth(user.id_token())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&document)
            .send()
            .await
            .map_err(ApiError::from)?;

        read_response::<IgnoredAny>(response).await?;
        Ok(())
    }
}

impl std::fmt::Debug for FirestoreDocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirestoreDocumentStore")
            .field("documents_path", &self.documents_path)
            .finish_non_exhaustive()
    }
}
