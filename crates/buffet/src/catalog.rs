//! Static model catalog.

use buffet_types::ModelDescriptor;

/// Number of catalog entries selected by default.
const DEFAULT_SELECTION_SIZE: usize = 2;

/// Models offered when the configuration does not list any.
pub fn default_catalog() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("openai/gpt-oss-20b", "GPT-OSS 20B"),
        ModelDescriptor::new(
            "google/gemini-2.5-flash-image-preview",
            "Gemini 2.5 Flash Image Preview",
        ),
        ModelDescriptor::new("deepseek/deepseek-chat-v3.1", "DeepSeek Chat v3.1"),
        ModelDescriptor::new("google/gemma-3n-e2b-it", "Gemma 3N E2B Instruct"),
    ]
}

/// The leading entries of `catalog`, used as the initial selection.
pub fn default_selection(catalog: &[ModelDescriptor]) -> Vec<String> {
    catalog
        .iter()
        .take(DEFAULT_SELECTION_SIZE)
        .map(|m| m.id.clone())
        .collect()
}

/// Display name for `id`, falling back to the id itself for unlisted models.
pub fn label_for<'a>(catalog: &'a [ModelDescriptor], id: &'a str) -> &'a str {
    catalog
        .iter()
        .find(|m| m.id == id)
        .map(|m| m.label.as_str())
        .unwrap_or(id)
}
