//! Upstream LLM client: one prompt, one model, one completion.

use std::sync::Arc;

use super::error::LLMError;
use super::provider::LLMProvider;
use super::types::ChatRequest;

/// Issues single-turn completions against a shared provider.
///
/// Cheap to clone; every clone shares the same provider and credential.
#[derive(Clone)]
pub struct UpstreamClient {
    provider: Arc<dyn LLMProvider>,
    system_prompt: Arc<str>,
}

impl UpstreamClient {
    pub fn new(provider: Arc<dyn LLMProvider>, system_prompt: impl Into<Arc<str>>) -> Self {
        Self {
            provider,
            system_prompt: system_prompt.into(),
        }
    }

    /// Ask `model` to complete `prompt`, returning the generated text.
    ///
    /// A response without a message yields the empty string.
    pub async fn call(&self, model: &str, prompt: &str) -> Result<String, LLMError> {
        let request = ChatRequest::single_turn(model, &*self.system_prompt, prompt);
        let response = self.provider.chat(request).await?;
        Ok(response.into_content())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm::types::{ChatResponse, Role};

    #[derive(Default)]
    struct Recording {
        requests: Mutex<Vec<(String, Vec<(Role, String)>)>>,
    }

    #[async_trait]
    impl LLMProvider for Recording {
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, LLMError> {
            let messages = request
                .messages
                .into_iter()
                .map(|m| (m.role, m.content))
                .collect();
            self.requests
                .lock()
                .unwrap()
                .push((request.model, messages));
            Ok(ChatResponse::from_value(serde_json::json!({
                "choices": [{"message": {"content": "pong"}}]
            })))
        }
    }

    #[tokio::test]
    async fn call_wraps_prompt_in_system_and_user_messages() {
        let provider = Arc::new(Recording::default());
        let client = UpstreamClient::new(provider.clone(), "be brief");

        let content = client.call("openai/gpt-oss-20b", "ping").await.unwrap();
        assert_eq!(content, "pong");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (model, messages) = &requests[0];
        assert_eq!(model, "openai/gpt-oss-20b");
        assert_eq!(
            messages,
            &vec![
                (Role::System, "be brief".to_string()),
                (Role::User, "ping".to_string()),
            ]
        );
    }
}
