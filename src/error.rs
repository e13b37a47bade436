//! Error types for Libraria server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Invalid-field error naming the offending field
    pub fn invalid_field(field: &str, message: &str) -> Self {
        AppError::InvalidField {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Postgres unique_violation SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message, field) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, "authentication", msg.clone(), None)
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, "authorization", msg.clone(), None)
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, "not_found", msg.clone(), None)
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation", msg.clone(), None)
            }
            AppError::Duplicate(msg) => {
                (StatusCode::CONFLICT, "duplicate_record", msg.clone(), None)
            }
            AppError::InvalidField { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_field",
                message.clone(),
                Some(field.clone()),
            ),
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, "domain_conflict", msg.clone(), None)
            }
            AppError::Database(e) => {
                // The uniqueness checks are check-then-act; the database
                // constraint is the backstop and still surfaces as a conflict.
                let is_unique_violation = e
                    .as_database_error()
                    .and_then(|d| d.code())
                    .map(|c| c == UNIQUE_VIOLATION)
                    .unwrap_or(false);

                if is_unique_violation {
                    (
                        StatusCode::CONFLICT,
                        "duplicate_record",
                        "Record already exists".to_string(),
                        None,
                    )
                } else {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "database",
                        "Database error".to_string(),
                        None,
                    )
                }
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal",
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: kind.to_string(),
            message,
            field,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
