// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the client core and the backend API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// ─── Client core ─────────────────────────────────────────────

/// Failure talking to the backend.
///
/// Prior client state is always left intact; the caller may retry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl NetworkError {
    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// User input rejected before anything is sent.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Description is required")]
    EmptyDescription,

    #[error("Added-by name is required")]
    EmptyAddedBy,

    #[error("Amount must be a finite number >= 0 (got {0})")]
    InvalidAmount(f64),

    #[error("Amount is not a number: {0:?}")]
    UnparsableAmount(String),

    #[error("At least one participant is required")]
    NoParticipants,
}

/// Failure of `ExpenseSyncClient::add`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddExpenseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Failure to obtain a push token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Device cannot receive push notifications")]
    NotEligible,

    #[error("Notification permission not granted")]
    PermissionDenied,

    #[error("No push project id configured")]
    MissingProjectId,

    #[error("Push service error: {0}")]
    Platform(String),
}

impl TokenError {
    /// True when the failure is a setup problem that retrying cannot fix.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, TokenError::MissingProjectId)
    }
}

/// Why the notification feature could not be set up during mount.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("Token registration failed: {0}")]
    Register(#[from] NetworkError),
}

/// Failure reported by the OS notification service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Not supported on this device: {0}")]
    Unsupported(&'static str),

    #[error("Notification service error: {0}")]
    Failed(String),
}

// ─── Backend API ─────────────────────────────────────────────

/// Backend error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Push service error: {0}")]
    PushService(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
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
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::PushService(msg) => {
                (StatusCode::BAD_GATEWAY, "push_error", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
