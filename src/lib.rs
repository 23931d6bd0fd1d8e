// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense Splitter: shared expenses with push notifications.
//!
//! The `client` module is the device-side core: push permission and token
//! lifecycle, notification listeners, and an expense list mirror kept in
//! sync with the backend. The remaining modules make up that backend: a
//! small JSON API that stores tokens and expenses and pushes a notification
//! for every new expense.

pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod platform;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod time_utils;

use db::JsonStore;
use middleware::RequestCounts;
use services::{ExpenseService, PushService};

/// Shared backend state.
pub struct AppState {
    pub db: JsonStore,
    pub expense_service: ExpenseService,
    pub request_counts: RequestCounts,
}

impl AppState {
    pub fn new(db: JsonStore, push_service: PushService) -> Self {
        Self {
            expense_service: ExpenseService::new(db.clone(), push_service),
            db,
            request_counts: RequestCounts::default(),
        }
    }
}
