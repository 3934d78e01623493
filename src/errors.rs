use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("upload failed: {0}")]
    Upload(String),

    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(anyhow::anyhow!(msg.into()))
    }
}

// --- JSON envelope ---

#[derive(Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
    status: u16,
}

impl AppError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::NotFound(_) => "not_found",
            Self::Upload(_) => "upload_failed",
            Self::Database(_) => "database_error",
            Self::Internal(_) => "internal_server_error",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upload(_) | Self::Database(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        // Log according to severity.
        if status.is_server_error() {
            tracing::error!(code = self.code(), status = status.as_u16(), "{message}");
        } else {
            tracing::warn!(code = self.code(), status = status.as_u16(), "{message}");
        }

        let envelope = ErrorEnvelope {
            error: ErrorBody {
                code: self.code(),
                message,
                status: status.as_u16(),
            },
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        assert_eq!(
            AppError::validation("too short").status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            AppError::not_found("no such report").status_code(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn storage_errors_map_to_500() {
        assert_eq!(
            AppError::Database(diesel::result::Error::NotInTransaction).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::internal("pool exhausted").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
