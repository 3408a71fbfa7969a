//! Error handling

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::features::ParseError;
use crate::pipeline::{ArtifactKind, PredictError};
use crate::render;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Client errors
    InvalidInput(ParseError),

    // Service state errors
    ModelUnavailable(ArtifactKind),

    // Inference errors
    InferenceFailed(String),
    InferenceTimeout { elapsed_ms: u64 },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, heading, message) = match &self {
            AppError::InvalidInput(err) => {
                tracing::debug!(field = err.field(), "rejected form input");
                (StatusCode::BAD_REQUEST, "Invalid input", err.to_string())
            }
            AppError::ModelUnavailable(kind) => {
                tracing::error!(artifact = %kind, "prediction refused: artifact not loaded");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Model unavailable",
                    format!(
                        "The {kind} artifact is not loaded, so predictions are disabled. \
                         Please try again once the service is fully provisioned."
                    ),
                )
            }
            AppError::InferenceFailed(msg) => {
                tracing::error!("inference error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Prediction failed",
                    format!("The model could not process this observation: {msg}"),
                )
            }
            AppError::InferenceTimeout { elapsed_ms } => {
                tracing::error!(elapsed_ms, "inference timed out");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "Prediction timed out",
                    "The model took too long to answer. Please try again.".to_string(),
                )
            }
        };

        let body = Html(render::error_page(heading, &message));
        (status, body).into_response()
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        match err {
            PredictError::Parse(e) => AppError::InvalidInput(e),
            PredictError::ModelUnavailable(kind) => AppError::ModelUnavailable(kind),
            PredictError::Inference(e) => AppError::InferenceFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_map_to_bad_request() {
        let err: AppError = PredictError::Parse(ParseError::MissingField { field: "depth" }).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_artifacts_map_to_service_unavailable() {
        let err: AppError = PredictError::ModelUnavailable(ArtifactKind::Model).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn inference_failures_map_to_internal_error() {
        let err: AppError =
            PredictError::Inference(crate::model::InferenceError("bad tensor".into())).into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn timeouts_map_to_gateway_timeout() {
        let response = AppError::InferenceTimeout { elapsed_ms: 2000 }.into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
