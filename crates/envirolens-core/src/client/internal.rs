use crate::{client::ClientSettings, session::SessionContext};

/// State shared by every clone of a [`Client`](crate::Client).
#[allow(missing_docs)]
#[derive(Debug)]
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    pub(crate) http_client: reqwest::Client,
    pub(crate) session: SessionContext,
}

#[allow(missing_docs)]
impl InternalClient {
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }
}
