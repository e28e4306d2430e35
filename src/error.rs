// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Flashcard set not found: {0}")]
    SetNotFound(String),

    #[error("Flashcard set is listed but its contents are gone: {0}")]
    StaleEntry(String),

    #[error("Flashcard set removed from index but its document could not be deleted: {0}")]
    PartialRemoval(String),

    #[error("Flashcard generation failed: {0}")]
    GenerationFailed(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Machine-readable error code used in API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "unauthorized",
            AppError::Validation(_) => "validation_error",
            AppError::StorageUnavailable(_) => "storage_unavailable",
            AppError::SetNotFound(_) => "set_not_found",
            AppError::StaleEntry(_) => "stale_entry",
            AppError::PartialRemoval(_) => "partial_removal",
            AppError::GenerationFailed(_) => "generation_failed",
            AppError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::SetNotFound(_) => StatusCode::NOT_FOUND,
            AppError::StaleEntry(_) => StatusCode::GONE,
            AppError::PartialRemoval(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let details = match &self {
            AppError::Unauthorized => None,
            AppError::Validation(msg) => Some(msg.clone()),
            AppError::SetNotFound(name)
            | AppError::StaleEntry(name)
            | AppError::PartialRemoval(name) => Some(name.clone()),
            AppError::GenerationFailed(msg) => Some(msg.clone()),
            AppError::StorageUnavailable(msg) => {
                tracing::error!(error = %msg, "Storage error");
                None
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                None
            }
        };

        let body = ErrorResponse {
            error: self.code().to_string(),
            details,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
