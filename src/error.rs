use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::{Environment, environment};
use crate::utils::response::{ApiResponse, FieldError};

/// Generic message returned for unexpected failures outside development.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    BadInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Build the error envelope, hiding internal details in production.
    pub fn to_envelope(&self, env: Environment) -> ApiResponse<serde_json::Value> {
        match self {
            AppError::Validation(errors) => {
                ApiResponse::error_with_fields(&self.to_string(), errors.clone())
            }
            AppError::Internal(_) if env == Environment::Production => {
                ApiResponse::error(INTERNAL_ERROR_MESSAGE)
            }
            other => ApiResponse::error(&other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_envelope(environment()))).into_response()
    }
}
