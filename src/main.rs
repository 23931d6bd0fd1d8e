// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense Splitter API Server
//!
//! Stores push tokens and expenses, and notifies registered devices when an
//! expense is added.

use anyhow::Context;
use expense_splitter::{
    config::Config, db::JsonStore, services::PushService, telemetry::init_logging, AppState,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Expense Splitter API");

    let db = JsonStore::open(&config.data_dir)
        .await
        .context("Failed to open data directory")?;

    let push_service = PushService::from_config(&config);
    tracing::info!(url = %config.expo_push_url, "Push service initialized");

    let state = Arc::new(AppState::new(db, push_service));
    let app = expense_splitter::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}
