//! LLM Buffet - fan a single prompt out to several LLMs and compare the answers side by side.

pub mod aggregate;
pub mod catalog;
pub mod chat;
pub mod client;
pub mod config;
pub mod handlers;
pub mod llm;
pub mod server;

pub use buffet_types::{ModelDescriptor, ModelResult};
