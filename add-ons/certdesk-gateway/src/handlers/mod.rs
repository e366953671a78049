//! HTTP handlers grouped by surface.

pub(crate) mod catalog;
pub(crate) mod chat;

use axum::http::StatusCode;
use axum::Json;

/// Error half of every fallible handler: status code plus `{ "status": "error", "message" }`.
pub(crate) type ApiError = (StatusCode, Json<serde_json::Value>);

pub(crate) fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(serde_json::json!({
            "status": "error",
            "message": message.into(),
        })),
    )
}

pub(crate) fn lock_poisoned() -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "admin state unavailable")
}
