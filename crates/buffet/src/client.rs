//! HTTP client for the LLM Buffet API.

use reqwest::Client;
use thiserror::Error;

use buffet_types::{
    AggregationRequest, AggregationResponse, ErrorResponse, ModelCatalogResponse, ModelResult,
};

/// Errors returned by [`BuffetClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server error (status {status}): {message}")]
    Server { status: u16, message: String },
}

/// Client for a running `buffet serve` instance.
#[derive(Clone)]
pub struct BuffetClient {
    client: Client,
    base_url: String,
}

impl BuffetClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// POST /api/v1/ai-models
    pub async fn aggregate(
        &self,
        prompt: &str,
        models: &[String],
    ) -> Result<Vec<ModelResult>, ClientError> {
        let url = format!("{}/api/v1/ai-models", self.base_url);
        let body = AggregationRequest {
            prompt: prompt.to_string(),
            models: models.to_vec(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let response = check_status(response).await?;
        let parsed: AggregationResponse = response.json().await?;
        Ok(parsed.results)
    }

    /// GET /api/v1/models
    pub async fn models(&self) -> Result<ModelCatalogResponse, ClientError> {
        let url = format!("{}/api/v1/models", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Turn a non-success response into [`ClientError::Server`], preferring the
/// `{"error": ...}` message when the body carries one.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(ClientError::Server { status, message })
}
