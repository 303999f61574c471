//! Plain-text rendering of chat threads, one section per model.

use std::fmt::Write;

use buffet_types::ModelDescriptor;

use crate::catalog;

use super::thread::{ChatThread, Turn};

/// Shown in place of a successful answer with no content.
const EMPTY_RESPONSE: &str = "(empty response)";

/// Render every turn of `thread` for each model in `models`.
///
/// Each model gets its own column-like section listing the prompts and that
/// model's answers. A failed call shows its error in place of the answer.
pub fn render_thread(
    thread: &ChatThread,
    models: &[String],
    models_catalog: &[ModelDescriptor],
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}", thread.title);
    for model in models {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", header(model, models_catalog));
        for turn in &thread.turns {
            write_exchange(&mut out, turn, model);
        }
    }
    out
}

/// Render a single turn across `models`.
pub fn render_turn(turn: &Turn, models: &[String], models_catalog: &[ModelDescriptor]) -> String {
    let mut out = String::new();
    for (i, model) in models.iter().enumerate() {
        if i > 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{}", header(model, models_catalog));
        write_exchange(&mut out, turn, model);
    }
    out
}

fn header(model: &str, models_catalog: &[ModelDescriptor]) -> String {
    let label = catalog::label_for(models_catalog, model);
    if label == model {
        format!("== {model} ==")
    } else {
        format!("== {label} ({model}) ==")
    }
}

fn write_exchange(out: &mut String, turn: &Turn, model: &str) {
    let _ = writeln!(out, "you: {}", turn.prompt);
    let Some(response) = turn.responses.get(model) else {
        return;
    };
    match &response.error {
        Some(error) => {
            let _ = writeln!(out, "error: {error}");
        }
        None if response.content.trim().is_empty() => {
            let _ = writeln!(out, "  {EMPTY_RESPONSE}");
        }
        None => {
            for line in response.content.lines() {
                let _ = writeln!(out, "  {line}");
            }
        }
    }
}
