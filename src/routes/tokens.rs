// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push token registration routes.

use crate::error::{AppError, Result};
use crate::models::{RegisterTokenRequest, RegisterTokenResponse, TokenList};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

const MAX_TOKEN_LEN: usize = 512;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register-token", post(register_token))
        .route("/tokens", get(list_tokens))
}

/// Register a device token. Registering a known token is a no-op.
async fn register_token(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterTokenRequest>, JsonRejection>,
) -> Result<Json<RegisterTokenResponse>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let token = req.token.trim();
    if token.is_empty() {
        return Err(AppError::BadRequest("token must not be empty".to_string()));
    }
    if token.len() > MAX_TOKEN_LEN {
        return Err(AppError::BadRequest(format!(
            "token longer than {} bytes",
            MAX_TOKEN_LEN
        )));
    }

    let response = if state.db.register_token(token).await? {
        tracing::info!("New push token registered");
        RegisterTokenResponse {
            status: "ok".to_string(),
            message: "Token registered".to_string(),
        }
    } else {
        RegisterTokenResponse {
            status: "exists".to_string(),
            message: "Token already exists".to_string(),
        }
    };

    Ok(Json(response))
}

/// List registered tokens.
async fn list_tokens(State(state): State<Arc<AppState>>) -> Json<TokenList> {
    Json(TokenList {
        tokens: state.db.tokens().await,
    })
}
