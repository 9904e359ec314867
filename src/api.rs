// MoltMarkets API client (credential validation only)

use crate::credentials::Credentials;
use crate::error::{SetupError, SetupResult};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use tracing::debug;

/// User record returned by `GET /me`. Only `balance` is required.
///
/// `balance` is kept as the exact JSON number the service sent so it can be
/// written to the shared state unchanged.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub balance: Number,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct MoltMarketsApi {
    client: Client,
    base_url: String,
}

impl MoltMarketsApi {
    /// No request timeout is configured; the call waits on the client's defaults.
    pub fn new(base_url: impl Into<String>) -> SetupResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Validate the API key with a single `GET /me`.
    ///
    /// Only a 200 counts as valid; any other status is returned as
    /// `ApiRejected` with the raw body. There are no retries.
    pub async fn validate_api_key(&self, credentials: &Credentials) -> SetupResult<UserProfile> {
        let url = format!("{}/me", self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", credentials.api_key))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(SetupError::ApiRejected { status: status.as_u16(), body });
        }

        serde_json::from_str(&body).map_err(|e| SetupError::json("API /me response", e))
    }
}
