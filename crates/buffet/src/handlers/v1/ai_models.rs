//! Fan-out endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use buffet_types::AggregationResponse;

use crate::handlers::response;
use crate::server::AppState;

/// Loosely typed request body; shape problems in `models` are reported as
/// "No models selected" rather than as parse failures.
#[derive(Deserialize)]
pub struct QueryModelsRequest {
    #[serde(default)]
    prompt: Option<String>,
    #[serde(default)]
    models: Option<Value>,
}

/// POST /api/v1/ai-models
pub async fn query_models(
    State(state): State<AppState>,
    payload: Result<Json<QueryModelsRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return response::bad_request(rejection.body_text()).into_response(),
    };

    let aggregator = match &state.aggregator {
        Ok(aggregator) => aggregator,
        Err(e) => {
            error!(error = %e, "Rejecting request: upstream credential not configured");
            return response::internal_error(e.to_string()).into_response();
        }
    };

    let prompt = req.prompt.unwrap_or_default();
    let models = model_ids(req.models);
    info!(models = models.len(), "Fanning out prompt");

    match aggregator.aggregate(&prompt, &models).await {
        Ok(results) => (StatusCode::OK, Json(AggregationResponse { results })).into_response(),
        Err(e) => response::bad_request(e.to_string()).into_response(),
    }
}

/// Model ids from the raw `models` field. Anything other than an array of
/// strings yields an empty list.
fn model_ids(value: Option<Value>) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::String(id) => Some(id),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_ids_accepts_string_array() {
        assert_eq!(
            model_ids(Some(json!(["a", "b"]))),
            vec!["a".to_string(), "b".to_string()]
        );
    }

    #[test]
    fn model_ids_rejects_other_shapes() {
        assert!(model_ids(None).is_empty());
        assert!(model_ids(Some(json!("a"))).is_empty());
        assert!(model_ids(Some(json!({"a": 1}))).is_empty());
        assert!(model_ids(Some(json!(["a", 1]))).is_empty());
        assert!(model_ids(Some(Value::Null)).is_empty());
    }
}
