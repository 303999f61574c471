//! LLM error types.

use thiserror::Error;

/// Errors that can occur when making an upstream chat-completion call.
///
/// These never escape an aggregation: each one is downgraded to the `error`
/// string of the model it belongs to.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request failed
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error: {status}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
