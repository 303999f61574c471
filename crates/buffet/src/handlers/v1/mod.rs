//! V1 API handlers.

mod ai_models;
mod models;

pub use ai_models::query_models;
pub use models::list_models;
