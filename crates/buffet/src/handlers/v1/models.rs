use axum::Json;
use axum::extract::State;

use buffet_types::ModelCatalogResponse;

use crate::server::AppState;

/// GET /api/v1/models
pub async fn list_models(State(state): State<AppState>) -> Json<ModelCatalogResponse> {
    Json(ModelCatalogResponse {
        models: state.models.to_vec(),
        default: state.default_models.to_vec(),
    })
}
