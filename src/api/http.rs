use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{AdminApi, Credentials, ImagePayload, LoginResponse};
use crate::error::{DashboardError, Result};
use crate::state::data::UserRecord;

/// HTTP implementation of `AdminApi`.
///
/// No timeout or retry: each call is a single request and failures go
/// straight back to the caller.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Turn a response into JSON, or into an error carrying the status and body
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(DashboardError::status(status.as_u16(), &body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| DashboardError::network(format!("Failed to parse response: {}", e)))
}

#[async_trait]
impl AdminApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = self.endpoint("login");
        debug!("POST {}", url);

        let response = self.client.post(&url).json(credentials).send().await?;
        read_json(response).await
    }

    async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>> {
        let url = self.endpoint("users");
        debug!("GET {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        read_json(response).await
    }

    async fn user_images(&self, user_id: i64, token: &str) -> Result<Vec<ImagePayload>> {
        let url = self.endpoint(&format!("user/{}", user_id));
        debug!("GET {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        read_json(response).await
    }
}
