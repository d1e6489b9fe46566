use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use symbi::{PipelineError, SYMBI_STATUS_HEADER};

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("assessment not found: {0}")]
    NotFound(String),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("storage error: {0}")]
    StorageError(String),

    #[error("scoring failed: {0}")]
    ScoringFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<PipelineError> for GatewayError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::Validation { message } => GatewayError::InvalidRequest(message),
            PipelineError::NotFound { id } => GatewayError::NotFound(id),
            PipelineError::Store(e) if e.is_unavailable() => {
                GatewayError::StorageUnavailable(e.to_string())
            }
            PipelineError::Store(e) => GatewayError::StorageError(e.to_string()),
            e @ (PipelineError::Scoring(_) | PipelineError::Timeout { .. }) => {
                GatewayError::ScoringFailed(e.to_string())
            }
            PipelineError::Internal { message } => GatewayError::InternalError(message),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, symbi_status) = match &self {
            GatewayError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            GatewayError::StorageUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "storage_unavailable")
            }
            GatewayError::StorageError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error"),
            GatewayError::ScoringFailed(_) => (StatusCode::INTERNAL_SERVER_ERROR, "scoring_error"),
            GatewayError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut headers = HeaderMap::new();
        headers.insert(SYMBI_STATUS_HEADER, HeaderValue::from_static(symbi_status));

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
