//! Fan-out aggregation: one prompt, many models, one ordered result list.
//!
//! Every model is queried in its own task. The aggregate is returned once all
//! tasks have settled; a failing model only affects its own slot.

use std::time::Instant;

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, info, warn};

use buffet_types::ModelResult;

use crate::llm::UpstreamClient;

/// Client input rejected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing prompt")]
    MissingPrompt,

    #[error("No models selected")]
    NoModels,
}

/// Fans a prompt out to several models through a shared upstream client.
#[derive(Clone)]
pub struct Aggregator {
    client: UpstreamClient,
}

impl Aggregator {
    pub fn new(client: UpstreamClient) -> Self {
        Self { client }
    }

    /// Query every model in `models` with `prompt`.
    ///
    /// The result has one entry per model, in input order. Per-model failures
    /// are recorded in that entry's `error`; only invalid input fails the call.
    pub async fn aggregate(
        &self,
        prompt: &str,
        models: &[String],
    ) -> Result<Vec<ModelResult>, ValidationError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ValidationError::MissingPrompt);
        }
        if models.is_empty() {
            return Err(ValidationError::NoModels);
        }

        let started = Instant::now();
        let tasks = models.iter().map(|model| {
            let client = self.client.clone();
            let prompt = prompt.to_string();
            let task_model = model.clone();
            let handle = tokio::spawn(async move { query(&client, task_model, &prompt).await });
            let model = model.clone();
            async move {
                handle.await.unwrap_or_else(|e| {
                    warn!(model = %model, error = %e, "Model task aborted");
                    ModelResult::failure(model, format!("task failed: {e}"))
                })
            }
        });

        let results = join_all(tasks).await;

        let failed = results.iter().filter(|r| r.is_error()).count();
        info!(
            models = results.len(),
            failed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Aggregation complete"
        );

        Ok(results)
    }
}

async fn query(client: &UpstreamClient, model: String, prompt: &str) -> ModelResult {
    let started = Instant::now();
    match client.call(&model, prompt).await {
        Ok(content) => {
            debug!(
                model = %model,
                elapsed_ms = started.elapsed().as_millis() as u64,
                chars = content.len(),
                "Model responded"
            );
            ModelResult::success(model, content)
        }
        Err(e) => {
            warn!(
                model = %model,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "Model call failed"
            );
            ModelResult::failure(model, e.to_string())
        }
    }
}
