//! Submitting a prompt: record the turn, fan it out, merge the answers.

use async_trait::async_trait;
use tracing::warn;

use buffet_types::ModelResult;

use crate::client::{BuffetClient, ClientError};

use super::store::ChatStore;
use super::thread::derive_title;

/// Anything that can answer a prompt for several models at once.
#[async_trait]
pub trait AggregateBackend: Send + Sync {
    async fn aggregate(
        &self,
        prompt: &str,
        models: &[String],
    ) -> Result<Vec<ModelResult>, ClientError>;
}

#[async_trait]
impl AggregateBackend for BuffetClient {
    async fn aggregate(
        &self,
        prompt: &str,
        models: &[String],
    ) -> Result<Vec<ModelResult>, ClientError> {
        BuffetClient::aggregate(self, prompt, models).await
    }
}

/// What happened to a submitted prompt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Blank prompt or no models selected; nothing was recorded.
    Ignored,
    /// The turn was recorded and the responses merged into it.
    Answered { thread_id: String, turn_index: usize },
    /// The turn was recorded but the request failed; it has no responses.
    /// An error answer from the server still renames a placeholder thread.
    Failed {
        thread_id: String,
        turn_index: usize,
        error: ClientError,
    },
}

/// Run one chat turn against the active thread.
pub async fn submit_turn(
    store: &mut ChatStore,
    backend: &dyn AggregateBackend,
    prompt: &str,
    models: &[String],
) -> SubmitOutcome {
    let prompt = prompt.trim();
    if prompt.is_empty() || models.is_empty() {
        return SubmitOutcome::Ignored;
    }

    let thread_id = store.ensure_active_thread().await;
    let Some(turn_index) = store.append_turn(&thread_id, prompt).await else {
        return SubmitOutcome::Ignored;
    };

    match backend.aggregate(prompt, models).await {
        Ok(results) => {
            store.merge_responses(&thread_id, turn_index, &results).await;
            store.rename_if_default(&thread_id, &derive_title(prompt)).await;
            SubmitOutcome::Answered {
                thread_id,
                turn_index,
            }
        }
        Err(error) => {
            warn!(error = %error, "Prompt submission failed");
            // The server answered, so the exchange still names the thread.
            if matches!(error, ClientError::Server { .. }) {
                store.rename_if_default(&thread_id, &derive_title(prompt)).await;
            }
            SubmitOutcome::Failed {
                thread_id,
                turn_index,
                error,
            }
        }
    }
}
