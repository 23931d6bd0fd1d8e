// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense routes.

use crate::error::{AppError, Result};
use crate::models::{ExpenseList, ExpenseRecord, NewExpense};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses))
        .route("/add-expense", post(add_expense))
}

/// List all expenses in insertion order.
async fn list_expenses(State(state): State<Arc<AppState>>) -> Json<ExpenseList> {
    Json(state.db.expenses().await)
}

/// Body of `POST /add-expense`.
#[derive(Debug, Deserialize, Validate)]
struct AddExpenseRequest {
    #[validate(length(min = 1, max = 200))]
    description: String,
    #[validate(range(min = 0.0))]
    amount: f64,
    #[validate(length(min = 1, max = 100))]
    added_by: String,
    #[validate(length(min = 1, max = 50))]
    participants: Vec<String>,
}

/// Response for a stored expense.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct AddExpenseResponse {
    pub status: String,
    pub expense: ExpenseRecord,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub push_response: serde_json::Value,
}

/// Store an expense and notify registered devices.
async fn add_expense(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<AddExpenseRequest>, JsonRejection>,
) -> Result<Json<AddExpenseResponse>> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let expense = NewExpense::new(&req.description, req.amount, &req.added_by, &req.participants)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let outcome = state.expense_service.add_expense(expense).await?;

    Ok(Json(AddExpenseResponse {
        status: "ok".to_string(),
        expense: outcome.expense,
        push_response: outcome.push_response,
    }))
}
