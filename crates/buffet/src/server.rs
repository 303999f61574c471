use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use buffet_types::ModelDescriptor;

use crate::aggregate::Aggregator;
use crate::config::{Config, ConfigurationError};
use crate::handlers;
use crate::llm::{OpenAICompatibleProvider, UpstreamClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Resolved once at startup; requests fail with 500 while the credential is missing.
    pub aggregator: Result<Aggregator, ConfigurationError>,
    pub models: Arc<[ModelDescriptor]>,
    pub default_models: Arc<[String]>,
}

impl AppState {
    /// Wire the upstream provider from configuration and the environment.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let http = config.upstream.http_client()?;
        let aggregator = config.upstream.resolve_api_key().map(|key| {
            let provider =
                OpenAICompatibleProvider::new(http, config.upstream.base_url.clone(), Some(key));
            let client =
                UpstreamClient::new(Arc::new(provider), config.upstream.system_prompt.as_str());
            Aggregator::new(client)
        });

        match &aggregator {
            Ok(_) => info!(base_url = %config.upstream.base_url, "Upstream provider configured"),
            Err(e) => warn!(error = %e, "Upstream provider unavailable"),
        }

        Ok(Self {
            aggregator,
            models: config.models.clone().into(),
            default_models: config.default_selection().into(),
        })
    }
}

pub fn build_app(state: AppState, request_timeout_secs: u64) -> Router {
    let api_v1 = Router::new()
        .route("/ai-models", post(handlers::v1::query_models))
        .route("/models", get(handlers::v1::list_models))
        .with_state(state.clone());

    Router::new()
        .route("/livez", get(handlers::livez))
        .route("/readyz", get(handlers::readyz))
        .route("/version", get(handlers::version))
        .with_state(state)
        .nest("/api/v1", api_v1)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(request_timeout_secs),
        ))
}
