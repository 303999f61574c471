//! Chat thread data model.

use std::collections::BTreeMap;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use buffet_types::ModelResult;

/// Title carried by a thread until it is named after its first prompt.
pub const DEFAULT_TITLE: &str = "New chat";

const TITLE_MAX_CHARS: usize = 40;

/// One model's answer to a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub content: String,
    pub error: Option<String>,
}

impl From<&ModelResult> for ModelResponse {
    fn from(result: &ModelResult) -> Self {
        Self {
            content: result.content.clone(),
            error: result.error.clone(),
        }
    }
}

/// A prompt and the responses it received, keyed by model id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Turn {
    pub prompt: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub responses: BTreeMap<String, ModelResponse>,
}

impl Turn {
    /// Timestamps are kept at millisecond precision, the precision they are
    /// stored with.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            created_at: Utc::now().trunc_subsecs(3),
            responses: BTreeMap::new(),
        }
    }
}

/// An ordered conversation with several models at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatThread {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub turns: Vec<Turn>,
}

impl ChatThread {
    /// Create an empty thread with a fresh id and the placeholder title.
    pub fn new() -> Self {
        Self {
            id: ulid::Ulid::new().to_string(),
            title: DEFAULT_TITLE.to_string(),
            turns: Vec::new(),
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title.trim().eq_ignore_ascii_case(DEFAULT_TITLE)
    }
}

impl Default for ChatThread {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread title derived from a prompt: its first 40 characters, with an
/// ellipsis when truncated.
pub fn derive_title(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
