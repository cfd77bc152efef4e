//! Mapping pipeline errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use jokegen_error::{JokegenError, JokegenErrorKind};
use serde_json::json;
use tracing::{error, warn};

/// A pipeline error on its way to the client.
///
/// Rendered as `{"error": "<message>"}` with a status that says who is at
/// fault.
#[derive(Debug, derive_more::From)]
pub struct ApiError(JokegenError);

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            JokegenErrorKind::UnknownStoryType(_) => StatusCode::BAD_REQUEST,
            JokegenErrorKind::VocabularyUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            JokegenErrorKind::Generation(_) => StatusCode::BAD_GATEWAY,
            JokegenErrorKind::Store(_) | JokegenErrorKind::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.kind().to_string();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %message, "Story request failed");
        } else {
            warn!(status = status.as_u16(), error = %message, "Story request rejected");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}
