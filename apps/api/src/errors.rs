use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const INVALID_FILE_TYPE_MESSAGE: &str =
    "Invalid file type. Only PDF, DOC, DOCX, and TXT files are allowed";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported file type")]
    UnsupportedFileType,

    #[error("Could not extract text from the file")]
    ExtractionFailed,

    #[error("Payload exceeds {limit}")]
    PayloadTooLarge { limit: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedFileType => (
                StatusCode::BAD_REQUEST,
                INVALID_FILE_TYPE_MESSAGE.to_string(),
            ),
            AppError::ExtractionFailed => (
                StatusCode::BAD_REQUEST,
                "Could not extract text from the file".to_string(),
            ),
            AppError::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File too large. Maximum size is {limit}"),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream fetch error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "Could not retrieve the resume from the given URL".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Error analyzing resume: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while analyzing the resume".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
