use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorBody;
use crate::constants::messages;

#[derive(Debug)]
pub enum ApiError {
    ValidationError(String),

    /// Lookup failures; the message reaches the client verbatim.
    CaseLookup(String),

    AssistantError(String),

    DatabaseError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            Self::CaseLookup(msg) => write!(f, "Case lookup error: {msg}"),
            Self::AssistantError(msg) => write!(f, "Assistant error: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::CaseLookup(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::AssistantError(msg) => {
                tracing::error!("Assistant error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    messages::ASSISTANT_FAILED.to_string(),
                )
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    pub fn database(err: impl fmt::Display) -> Self {
        Self::DatabaseError(err.to_string())
    }
}
