// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP route handlers.

pub mod expenses;
pub mod tokens;

use crate::error::AppError;
use crate::AppState;
use axum::{extract::State, http::Uri, middleware, routing::get, Json, Router};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct HomeResponse {
    pub message: String,
}

/// Liveness message
async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Expense Splitter backend is running".to_string(),
    })
}

/// Request counts per route, e.g. `"POST /add-expense": 3`.
async fn stats(State(state): State<Arc<AppState>>) -> Json<BTreeMap<String, u64>> {
    Json(state.request_counts.snapshot())
}

/// JSON 404 for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

/// Build the complete router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/stats", get(stats))
        .merge(tokens::routes())
        .merge(expenses::routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::request_counts::count_requests,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
