//! Wire types for the LLM Buffet HTTP API.
//!
//! These are the request and response bodies of `POST /api/v1/ai-models` and
//! `GET /api/v1/models`, shared by the server and the HTTP client.

use serde::{Deserialize, Serialize};

// ============================================================================
// Model catalog
// ============================================================================

/// A selectable upstream model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Opaque upstream model identifier (e.g. `openai/gpt-oss-20b`).
    pub id: String,
    /// Display name.
    pub label: String,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Response body of `GET /api/v1/models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelCatalogResponse {
    pub models: Vec<ModelDescriptor>,
    pub default: Vec<String>,
}

// ============================================================================
// Aggregation
// ============================================================================

/// Request body of `POST /api/v1/ai-models`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationRequest {
    pub prompt: String,
    pub models: Vec<String>,
}

/// One model's outcome within an aggregation.
///
/// `content` is empty whenever `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResult {
    pub model: String,
    pub content: String,
    pub error: Option<String>,
}

impl ModelResult {
    pub fn success(model: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            error: None,
        }
    }

    pub fn failure(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Response body of a successful aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationResponse {
    pub results: Vec<ModelResult>,
}

/// Body of every non-200 API response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
