// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense mirror synchronization.

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use expense_splitter::client::{BackendClient, ExpenseSyncClient, MountFlag};
use expense_splitter::error::{AddExpenseError, NetworkError, ValidationError};
use expense_splitter::models::ExpenseList;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

mod common;

fn dinner() -> Value {
    json!({
        "expenses": [{
            "description": "Dinner",
            "amount": 40,
            "added_by": "Alice",
            "participants": ["Alice", "Bob"]
        }]
    })
}

/// Backend stub that serves a fixed list.
async fn serve_list(list: Value) -> String {
    let router = Router::new().route("/expenses", get(move || async move { Json(list) }));
    common::spawn_router(router).await
}

fn mirror_json(client: &ExpenseSyncClient) -> String {
    serde_json::to_string(&client.mirror()).unwrap()
}

#[tokio::test]
async fn test_fetch_replaces_mirror() {
    let url = serve_list(dinner()).await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));

    let list = client.fetch_all().await.unwrap();

    let mirror = client.mirror();
    assert_eq!(mirror, list);
    assert_eq!(mirror.len(), 1);
    let record = &mirror.expenses[0];
    assert_eq!(record.description, "Dinner");
    assert_eq!(record.amount, 40.0);
    assert_eq!(record.added_by, "Alice");
    assert_eq!(record.participants, vec!["Alice", "Bob"]);
    assert!(record.id.is_none());
}

#[tokio::test]
async fn test_failed_fetch_leaves_mirror_untouched() {
    // First call succeeds, then a server error, then a malformed body.
    let calls = Arc::new(AtomicUsize::new(0));
    let router = Router::new().route(
        "/expenses",
        get(move || {
            let calls = calls.clone();
            async move {
                match calls.fetch_add(1, Ordering::SeqCst) {
                    0 => (StatusCode::OK, Json(dinner())),
                    1 => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": "boom" }))),
                    _ => (StatusCode::OK, Json(json!({ "expenses": "nope" }))),
                }
            }
        }),
    );
    let url = common::spawn_router(router).await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));
    client.fetch_all().await.unwrap();
    let before = mirror_json(&client);

    let err = client.fetch_all().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(mirror_json(&client), before);

    let err = client.fetch_all().await.unwrap_err();
    assert!(matches!(err, NetworkError::Decode(_)));
    assert_eq!(mirror_json(&client), before);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ExpenseSyncClient::new(BackendClient::new(common::DEAD_URL));

    let err = client.fetch_all().await.unwrap_err();

    assert!(matches!(err, NetworkError::Transport(_)));
    assert!(client.mirror().is_empty());
}

#[tokio::test]
async fn test_invalid_input_sends_nothing() {
    let (url, state) = common::spawn_backend().await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));

    let err = client.add("Taxi", -1.0, "Bob", &["Alice", "Bob"]).await.unwrap_err();
    assert_eq!(
        err,
        AddExpenseError::Validation(ValidationError::InvalidAmount(-1.0))
    );

    let err = client.add("  ", 20.0, "Bob", &["Alice", "Bob"]).await.unwrap_err();
    assert_eq!(err, AddExpenseError::Validation(ValidationError::EmptyDescription));

    let none: [&str; 0] = [];
    let err = client.add("Taxi", 20.0, "Bob", &none).await.unwrap_err();
    assert_eq!(err, AddExpenseError::Validation(ValidationError::NoParticipants));

    assert_eq!(state.request_counts.get("POST", "/add-expense"), 0);
    assert_eq!(state.request_counts.get("GET", "/expenses"), 0);
    assert!(state.db.expenses().await.is_empty());
}

#[tokio::test]
async fn test_add_triggers_refetch() {
    let (url, state) = common::spawn_backend().await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));
    let mut updates = client.subscribe();

    let record = client.add("Taxi", 20.0, "Bob", &["Alice", "Bob"]).await.unwrap();

    assert!(record.id.is_some());
    assert_eq!(state.request_counts.get("POST", "/add-expense"), 1);
    assert_eq!(state.request_counts.get("GET", "/expenses"), 1);
    assert!(updates.has_changed().unwrap());
    assert_eq!(updates.borrow_and_update().len(), 1);
    assert_eq!(client.mirror(), state.db.expenses().await);
}

#[tokio::test]
async fn test_add_uses_server_list_not_local_record() {
    // The server acknowledges without echoing the record, and its list
    // holds something other than what was submitted.
    let router = Router::new()
        .route("/add-expense", post(|| async { Json(json!({ "status": "ok" })) }))
        .route(
            "/expenses",
            get(|| async {
                Json(json!({
                    "expenses": [{
                        "id": "srv-1",
                        "description": "Taxi to airport",
                        "amount": 21.5,
                        "added_by": "Bob",
                        "participants": ["Alice", "Bob"]
                    }]
                }))
            }),
        );
    let url = common::spawn_router(router).await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));

    let record = client.add("Taxi", 20.0, "Bob", &["Alice", "Bob"]).await.unwrap();

    // Caller gets what it submitted; the mirror holds the server's view.
    assert_eq!(record.description, "Taxi");
    assert!(record.id.is_none());
    let mirror = client.mirror();
    assert_eq!(mirror.len(), 1);
    assert_eq!(mirror.expenses[0].id.as_deref(), Some("srv-1"));
    assert_eq!(mirror.expenses[0].description, "Taxi to airport");
}

#[tokio::test]
async fn test_add_survives_failed_refetch() {
    let router = Router::new()
        .route("/add-expense", post(|| async { Json(json!({ "status": "ok" })) }))
        .route("/expenses", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let url = common::spawn_router(router).await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));

    let result = client.add("Taxi", 20.0, "Bob", &["Bob"]).await;

    assert!(result.is_ok());
    assert_eq!(client.mirror(), ExpenseList::default());
}

#[tokio::test]
async fn test_rejected_add_is_network_error() {
    let router = Router::new().route(
        "/add-expense",
        post(|| async { (StatusCode::BAD_GATEWAY, "push down") }),
    );
    let url = common::spawn_router(router).await;
    let client = ExpenseSyncClient::new(BackendClient::new(&url));

    let err = client.add("Taxi", 20.0, "Bob", &["Bob"]).await.unwrap_err();

    match err {
        AddExpenseError::Network(e) => assert_eq!(e.status(), Some(502)),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_late_response_after_unmount_is_not_written() {
    let router = Router::new().route(
        "/expenses",
        get(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(dinner())
        }),
    );
    let url = common::spawn_router(router).await;
    let mounted = MountFlag::new(true);
    let client = ExpenseSyncClient::with_mount_flag(BackendClient::new(&url), mounted.clone());

    let pending = tokio::spawn({
        let client = client.clone();
        async move { client.fetch_all().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    mounted.set(false);

    let list = pending.await.unwrap().unwrap();
    assert_eq!(list.len(), 1);
    assert!(client.mirror().is_empty());
}
