// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use expense_splitter::db::JsonStore;
use expense_splitter::routes::create_router;
use expense_splitter::services::PushService;
use expense_splitter::AppState;
use std::sync::Arc;

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(JsonStore::new_mock(), PushService::new_mock()));

    (create_router(state.clone()), state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_router(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("No local address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    format!("http://{}", addr)
}

/// Run the real backend (offline push) and return its URL and state.
#[allow(dead_code)]
pub async fn spawn_backend() -> (String, Arc<AppState>) {
    let (router, state) = create_test_app();
    (spawn_router(router).await, state)
}

/// A URL nothing listens on.
#[allow(dead_code)]
pub const DEAD_URL: &str = "http://127.0.0.1:1";
