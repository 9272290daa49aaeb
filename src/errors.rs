use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON error body returned by every failing endpoint:
/// `{"status": "error", "message": ..., "error": ...}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Error taxonomy for the service layer. Handlers return this directly; the
/// `IntoResponse` impl is the single place errors become HTTP.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::error::DbErr),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ValidationError(String),

    /// Operation disallowed in the record's current lifecycle state.
    #[error("{0}")]
    InvalidState(String),

    /// Duplicate unique field. Mapped to 400 to preserve the external
    /// contract, kept as its own variant so callers can distinguish it.
    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(format!("Validation failed: {}", err))
    }
}

impl ServiceError {
    /// Single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) | Self::InvalidState(_) | Self::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::DatabaseError(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn response_body(&self) -> ErrorResponse {
        let (message, detail) = match self {
            // 500s carry the raw error string in the optional `error` field.
            Self::DatabaseError(err) => ("Internal server error".to_string(), Some(err.to_string())),
            Self::Internal(err) => ("Internal server error".to_string(), Some(err.to_string())),
            other => (other.to_string(), None),
        };
        ErrorResponse {
            status: "error".to_string(),
            message,
            error: detail,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(self.response_body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ServiceError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::ValidationError("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::InvalidState("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Conflict("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Internal(anyhow::anyhow!("boom")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_expose_detail_field() {
        let body = ServiceError::Internal(anyhow::anyhow!("boom")).response_body();
        assert_eq!(body.status, "error");
        assert_eq!(body.error.as_deref(), Some("boom"));
    }

    #[test]
    fn user_errors_keep_their_message() {
        let body = ServiceError::Conflict("nama_bahan already in use".into()).response_body();
        assert_eq!(body.message, "nama_bahan already in use");
        assert!(body.error.is_none());
    }
}
