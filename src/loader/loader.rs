use crate::config::RemoteConfig;
use crate::loader::{LoadError, LoadResult};
use crate::model::User;
use crate::store::UserStore;

use log::{debug, info};
use reqwest::Client as ReqwestClient;

/// One-shot reader of the remote user collection.
///
/// Issues a single `GET` per call: no query parameters, no authentication,
/// no retry.
#[derive(Debug, Clone)]
pub struct RemoteLoader {
    pub endpoint: String,
    client: ReqwestClient,
}

impl RemoteLoader {
    /// Build a loader for the configured endpoint.
    pub fn new(config: &RemoteConfig) -> LoadResult<Self> {
        let mut builder = ReqwestClient::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint: config.endpoint.clone(),
            client: builder.build()?,
        })
    }

    /// Fetch and decode the full collection.
    pub async fn fetch_users(&self) -> LoadResult<Vec<User>> {
        debug!("GET {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::status(status, &self.endpoint));
        }

        let body = response.text().await?;
        let users: Vec<User> = serde_json::from_str(&body)?;
        info!("Fetched {} users from {}", users.len(), self.endpoint);
        Ok(users)
    }

    /// Fetch and, on success, replace the contents of `store`.
    ///
    /// On failure the store is left exactly as it was.
    pub async fn load_into(&self, store: &UserStore) -> LoadResult<usize> {
        let users = self.fetch_users().await?;
        let count = users.len();
        store.replace_all(users);
        Ok(count)
    }
}
