//! Upstream LLM client for chat completions.

mod client;
mod error;
mod openai;
mod provider;
mod types;

pub use client::UpstreamClient;
pub use error::LLMError;
pub use openai::OpenAICompatibleProvider;
pub use provider::LLMProvider;
pub use types::{ChatRequest, ChatResponse, Message, Role};
