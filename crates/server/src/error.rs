use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{pipeline::PipelineError, response::ApiResponse};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Pipeline(err) => match err {
                PipelineError::Staging(_) => (StatusCode::INTERNAL_SERVER_ERROR, "StagingError"),
                PipelineError::Archival(_) => (StatusCode::BAD_GATEWAY, "ArchivalFailed"),
                PipelineError::ArchivalTimeout(_) => {
                    (StatusCode::GATEWAY_TIMEOUT, "ArchivalTimeout")
                }
                PipelineError::Transcription(_) => {
                    (StatusCode::BAD_GATEWAY, "TranscriptionUnavailable")
                }
                PipelineError::TranscriptionTimeout(_) => {
                    (StatusCode::GATEWAY_TIMEOUT, "TranscriptionTimeout")
                }
            },
            ApiError::Multipart(err) => (err.status(), "MultipartError"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
        };

        if status_code.is_server_error() {
            tracing::error!("{}: {}", error_type, self);
        } else {
            tracing::debug!("{}: {}", error_type, self);
        }

        let error_message = match &self {
            ApiError::Multipart(_) => {
                "Failed to read the upload. Send the recording as a multipart 'audio' file field."
                    .to_string()
            }
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) => msg.clone(),
            _ => format!("{}: {}", error_type, self),
        };
        let response = ApiResponse::<()>::error(&error_message);
        (status_code, Json(response)).into_response()
    }
}
