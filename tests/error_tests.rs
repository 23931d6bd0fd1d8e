// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use expense_splitter::error::{AppError, NetworkError, RegistrationError, TokenError};

async fn response_parts(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_bad_request_carries_details() {
    let (status, body) = response_parts(AppError::BadRequest("amount".to_string())).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert_eq!(body["details"], "amount");
}

#[tokio::test]
async fn test_push_failure_is_bad_gateway() {
    let (status, body) = response_parts(AppError::PushService("HTTP 503".to_string())).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "push_error");
}

#[tokio::test]
async fn test_internal_errors_hide_details() {
    let (status, body) = response_parts(AppError::Storage("disk full".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.get("details").is_none());

    let (status, body) = response_parts(anyhow::anyhow!("secret path").into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_network_error_status() {
    let err = NetworkError::Status {
        status: 404,
        body: "missing".to_string(),
    };
    assert_eq!(err.status(), Some(404));
    assert_eq!(NetworkError::Transport("refused".to_string()).status(), None);
    assert_eq!(NetworkError::Decode("eof".to_string()).status(), None);
}

#[test]
fn test_only_missing_project_id_is_configuration_error() {
    assert!(TokenError::MissingProjectId.is_configuration_error());
    assert!(!TokenError::PermissionDenied.is_configuration_error());
    assert!(!TokenError::NotEligible.is_configuration_error());
    assert!(!TokenError::Platform("x".to_string()).is_configuration_error());
}

#[test]
fn test_registration_error_wraps_both_stages() {
    let err: RegistrationError = TokenError::PermissionDenied.into();
    assert_eq!(err.to_string(), "Notification permission not granted");

    let err: RegistrationError = NetworkError::Transport("refused".to_string()).into();
    assert!(err.to_string().starts_with("Token registration failed"));
}
