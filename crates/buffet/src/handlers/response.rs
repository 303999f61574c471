//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;

use buffet_types::ErrorResponse;

pub fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error(StatusCode::BAD_REQUEST, message)
}

pub fn internal_error(message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorResponse>) {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}
