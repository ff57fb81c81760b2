//! Custom error types for the planner service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the planner service
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A user with the requested name already exists
    #[error("user exists")]
    DuplicateUser,

    /// The supplied string is not an ISO calendar date
    #[error("invalid date")]
    InvalidDate,

    /// The supplied note text is empty or whitespace-only
    #[error("text required")]
    BlankText,

    /// No record exists for the username
    #[error("user not found: {0}")]
    RecordNotFound(String),

    /// A required request field is empty or missing
    #[error("missing fields")]
    MissingFields,

    /// A request field failed validation
    #[error("{0}")]
    Validation(String),

    /// Credentials or session token were rejected
    #[error("unauthorized")]
    Unauthorized,

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),

    /// Persistence failure on a write path
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl IntoResponse for PlannerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            PlannerError::DuplicateUser => (StatusCode::CONFLICT, "user exists".to_string()),
            PlannerError::InvalidDate => (StatusCode::BAD_REQUEST, "invalid date".to_string()),
            PlannerError::BlankText => (StatusCode::BAD_REQUEST, "text required".to_string()),
            PlannerError::RecordNotFound(_) => {
                (StatusCode::NOT_FOUND, "user not found".to_string())
            }
            PlannerError::MissingFields => (StatusCode::BAD_REQUEST, "missing fields".to_string()),
            PlannerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            PlannerError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            PlannerError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            PlannerError::Storage(e) => {
                error!("Storage failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for planner results
pub type PlannerResult<T> = Result<T, PlannerError>;
