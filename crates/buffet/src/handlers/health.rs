use axum::extract::State;
use axum::http::StatusCode;

use crate::server::AppState;

pub async fn livez() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// Ready once the upstream credential is available.
pub async fn readyz(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.aggregator.is_ok() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "upstream credential missing")
    }
}
