use anyhow::anyhow;
use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use reqwest_middleware::ClientWithMiddleware;

use crate::exchange_model::ExchangeRecord;

pub const DEFAULT_EXCHANGE_API_URL: &str = "https://api.meaegi.com/api/maplestory/token-exchange/all";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("exchange API responded with status {0}")]
    BadStatus(StatusCode),
    #[error("exchange API request failed: {0}")]
    Transport(#[from] reqwest_middleware::Error),
    #[error(transparent)]
    Decode(anyhow::Error),
}

/// Source of the token-exchange snapshot. One call per incoming command,
/// nothing cached in between.
#[automock]
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<ExchangeRecord>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ExchangeClient {
    client: ClientWithMiddleware,
    api_url: String,
}

impl ExchangeClient {
    pub fn new(client: ClientWithMiddleware, api_url: String) -> Self {
        Self { client, api_url }
    }
}

#[async_trait]
impl ExchangeApi for ExchangeClient {
    /// Single best-effort GET; only status 200 counts as success.
    async fn fetch_all(&self) -> Result<Vec<ExchangeRecord>, FetchError> {
        let resp = self.client.get(&self.api_url).send().await?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(FetchError::BadStatus(status));
        }

        let body = resp
            .text()
            .await
            .map_err(reqwest_middleware::Error::from)?;

        let mut deserializer = serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
            FetchError::Decode(anyhow!(
                "error decoding exchange snapshot: '{}'. Response body was: '{}'",
                e,
                body
            ))
        })
    }
}
