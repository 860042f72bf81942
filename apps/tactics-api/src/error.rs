//! Error types for the tactics API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tactics_core::{SampleError, SuggestError};
use thiserror::Error;

pub const JSON_CONTENT_TYPE_REQUIRED: &str = "Content-Type must be application/json";

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("No cards available in category '{0}'")]
    NoCardsAvailable(String),

    #[error("Content-Type must be application/json")]
    InvalidRequestBody,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Text generator unavailable: {0}")]
    CollaboratorUnavailable(String),

    #[error("Text generator timed out after {0}ms")]
    CollaboratorTimeout(u64),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::NoCardsAvailable(category) => (
                StatusCode::NOT_FOUND,
                format!("No cards available in category '{}'", category),
            ),
            ServerError::InvalidRequestBody => (
                StatusCode::BAD_REQUEST,
                JSON_CONTENT_TYPE_REQUIRED.to_string(),
            ),
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::CollaboratorUnavailable(detail) => {
                tracing::error!("Text generator error: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Suggestion service is unavailable, please try again later".to_string(),
                )
            }
            ServerError::CollaboratorTimeout(ms) => {
                tracing::error!("Text generator timed out after {}ms", ms);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    format!("Suggestion service did not respond within {}ms", ms),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<SampleError> for ServerError {
    fn from(err: SampleError) -> Self {
        match err {
            SampleError::NoCardsAvailable(category) => ServerError::NoCardsAvailable(category),
        }
    }
}

impl From<SuggestError> for ServerError {
    fn from(err: SuggestError) -> Self {
        match err {
            SuggestError::CollaboratorUnavailable(e) => {
                ServerError::CollaboratorUnavailable(e.to_string())
            }
            SuggestError::CollaboratorTimeout(budget) => {
                ServerError::CollaboratorTimeout(budget.as_millis() as u64)
            }
        }
    }
}
