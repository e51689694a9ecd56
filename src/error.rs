use std::collections::HashMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// The error taxonomy every handler maps into. Side-effect failures
/// (activity records, notification fan-out) never pass through here —
/// they are logged and dropped at the call site.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation error on {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("authentication required")]
    Unauthorized,

    #[error("permission denied")]
    PermissionDenied,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DbErr),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation { field, message: message.into() }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Maps a unique-index violation to a conflict with a domain message;
/// anything else stays a database error.
pub fn unique_violation(err: DbErr, message: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
        _ => AppError::Database(err),
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<&'a str, &'a str>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "validation error".to_string(),
                    fields: Some(HashMap::from([(*field, message.as_str())])),
                },
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorBody { error: self.to_string(), fields: None },
            ),
            AppError::PermissionDenied => (
                StatusCode::FORBIDDEN,
                ErrorBody { error: self.to_string(), fields: None },
            ),
            AppError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                ErrorBody { error: self.to_string(), fields: None },
            ),
            AppError::Conflict(_) => (
                StatusCode::CONFLICT,
                ErrorBody { error: self.to_string(), fields: None },
            ),
            AppError::Database(err) => {
                tracing::error!(error = %err, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody { error: "internal server error".to_string(), fields: None },
                )
            },
            AppError::Internal(err) => {
                tracing::error!(error = %err, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody { error: "internal server error".to_string(), fields: None },
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::validation("title", "bad").into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.into_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::PermissionDenied.into_response().status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::NotFound("movie").into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("duplicate").into_response().status(), StatusCode::CONFLICT);
    }
}
