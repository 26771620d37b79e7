use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use color_eyre::eyre;
use ml_analysis::AnalyzeError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AnalyzeApiError {
    #[error("No image provided")]
    NoImage,

    #[error("No file selected")]
    NoFileSelected,

    #[error("Unsupported file format")]
    UnsupportedFormat,

    #[error("Could not load image")]
    CouldNotLoad(#[source] AnalyzeError),

    #[error("File too large")]
    FileTooLarge,

    #[error("Malformed upload: {0}")]
    MalformedUpload(String),

    #[error("internal error")]
    Internal(#[from] eyre::Report),
}

impl IntoResponse for AnalyzeApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NoImage
            | Self::NoFileSelected
            | Self::UnsupportedFormat
            | Self::CouldNotLoad(_)
            | Self::MalformedUpload(_) => StatusCode::BAD_REQUEST,
            Self::FileTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Internal(report) => {
                error!("Analysis failed: {report:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let error_message = match self {
            Self::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<AnalyzeError> for AnalyzeApiError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::Internal(report) => Self::Internal(report),
            decode_error => Self::CouldNotLoad(decode_error),
        }
    }
}

impl From<MultipartError> for AnalyzeApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::FileTooLarge
        } else {
            Self::MalformedUpload(err.body_text())
        }
    }
}
