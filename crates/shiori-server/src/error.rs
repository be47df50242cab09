use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use shiori_core::error::ShioriError;

/// Handler error, rendered as `{"error": <kind>, "message": <notice>}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] ShioriError),

    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(err) => match err {
                ShioriError::DuplicateIdentity => StatusCode::CONFLICT,
                ShioriError::InvalidCredentials | ShioriError::NotAuthenticated => {
                    StatusCode::UNAUTHORIZED
                }
                ShioriError::UnknownAccount => StatusCode::NOT_FOUND,
                ShioriError::InvalidLabel(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ShioriError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
                ShioriError::Config(_) | ShioriError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Core(err) => err.kind(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(error = %self, %status, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        let body = serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
