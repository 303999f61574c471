//! Shared fixtures: a scripted upstream chat-completion server.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::{Value, json};

use buffet::aggregate::Aggregator;
use buffet::config::ConfigurationError;
use buffet::llm::{OpenAICompatibleProvider, UpstreamClient};
use buffet::server::{AppState, build_app};
use buffet::ModelDescriptor;

/// Counts calls made to the fake upstream.
#[derive(Clone, Default)]
pub struct Upstream {
    pub calls: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Model `a` answers "hi", `b` fails with 500, `empty` returns `{}`, and any
/// other model echoes the user prompt.
async fn chat_completions(State(upstream): State<Upstream>, Json(body): Json<Value>) -> Response {
    upstream.calls.fetch_add(1, Ordering::SeqCst);
    let model = body["model"].as_str().unwrap_or_default();
    match model {
        "a" => Json(json!({"choices": [{"message": {"role": "assistant", "content": "hi"}}]}))
            .into_response(),
        "b" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response(),
        "empty" => Json(json!({})).into_response(),
        _ => {
            let prompt = body["messages"][1]["content"].as_str().unwrap_or_default();
            Json(json!({"choices": [{"message": {"content": format!("echo: {prompt}")}}]}))
                .into_response()
        }
    }
}

/// Start the fake upstream on an ephemeral port and return its base URL.
pub async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route("/chat/completions", post(chat_completions))
        .with_state(upstream.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), upstream)
}

pub fn catalog() -> Vec<ModelDescriptor> {
    vec![
        ModelDescriptor::new("a", "Model A"),
        ModelDescriptor::new("b", "Model B"),
    ]
}

/// App state wired to the fake upstream at `base_url`.
pub fn state_for(base_url: String) -> AppState {
    let provider =
        OpenAICompatibleProvider::new(reqwest::Client::new(), base_url, Some("sk-test".into()));
    let client = UpstreamClient::new(Arc::new(provider), "You are a helpful assistant.");
    AppState {
        aggregator: Ok(Aggregator::new(client)),
        models: catalog().into(),
        default_models: vec!["a".to_string()].into(),
    }
}

/// App state with no upstream credential.
pub fn unconfigured_state() -> AppState {
    AppState {
        aggregator: Err(ConfigurationError::MissingCredential(
            "OPENROUTER_API_KEY".to_string(),
        )),
        models: catalog().into(),
        default_models: vec!["a".to_string()].into(),
    }
}

/// Serve the full API on an ephemeral port and return its base URL.
pub async fn spawn_api(state: AppState) -> String {
    let app = build_app(state, 30);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}
