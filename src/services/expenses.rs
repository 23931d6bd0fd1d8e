// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense recording service.
//!
//! Handles the add-expense workflow:
//! 1. Store the expense (assigning its id)
//! 2. Notify every registered device
//!
//! The push is best effort: once the expense is stored the request
//! succeeds, and a push failure is only reported in the outcome.

use crate::db::JsonStore;
use crate::error::Result;
use crate::models::{ExpenseRecord, NewExpense};
use crate::services::PushService;

/// Stores expenses and fans out the notification.
#[derive(Clone)]
pub struct ExpenseService {
    db: JsonStore,
    push: PushService,
}

/// Result of recording one expense.
#[derive(Debug, Clone)]
pub struct AddExpenseOutcome {
    pub expense: ExpenseRecord,
    /// Provider answer, `{"status": "no tokens"}`, or `{"status": "error", ...}`
    pub push_response: serde_json::Value,
}

impl ExpenseService {
    pub fn new(db: JsonStore, push: PushService) -> Self {
        Self { db, push }
    }

    pub fn push(&self) -> &PushService {
        &self.push
    }

    pub async fn add_expense(&self, expense: NewExpense) -> Result<AddExpenseOutcome> {
        let message = expense_message(&expense);
        let record = self.db.add_expense(expense).await?;
        tracing::info!(
            id = record.id.as_deref().unwrap_or_default(),
            added_by = %record.added_by,
            amount = record.amount,
            "Expense stored"
        );

        let tokens = self.db.tokens().await;
        let push_response = if tokens.is_empty() {
            serde_json::json!({ "status": "no tokens" })
        } else {
            match self.push.send(&tokens, &message).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(error = %e, "Expense push failed");
                    serde_json::json!({ "status": "error", "detail": e.to_string() })
                }
            }
        };

        Ok(AddExpenseOutcome {
            expense: record,
            push_response,
        })
    }
}

/// Notification body for a new expense.
///
/// Amounts always carry a fractional part (`$20.0`, `$33.33`).
pub fn expense_message(expense: &NewExpense) -> String {
    format!(
        "{} added ${:?} for {}. Each owes ${:?}",
        expense.added_by,
        expense.amount,
        expense.description,
        expense.split_amount()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_message() {
        let expense = NewExpense::new("Taxi", 20.0, "Bob", &["Alice", "Bob"]).unwrap();
        assert_eq!(
            expense_message(&expense),
            "Bob added $20.0 for Taxi. Each owes $10.0"
        );

        let expense = NewExpense::new("Dinner", 100.0, "Alice", &["A", "B", "C"]).unwrap();
        assert_eq!(
            expense_message(&expense),
            "Alice added $100.0 for Dinner. Each owes $33.33"
        );

        let expense = NewExpense::new("Coffee", 7.5, "Carol", &["Carol", "Dan"]).unwrap();
        assert_eq!(
            expense_message(&expense),
            "Carol added $7.5 for Coffee. Each owes $3.75"
        );
    }

    #[tokio::test]
    async fn test_add_expense_without_tokens_skips_push() {
        let push = PushService::new_mock();
        let service = ExpenseService::new(JsonStore::new_mock(), push.clone());

        let outcome = service
            .add_expense(NewExpense::new("Taxi", 20.0, "Bob", &["Alice", "Bob"]).unwrap())
            .await
            .unwrap();

        assert_eq!(outcome.push_response["status"], "no tokens");
        assert!(push.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_add_expense_notifies_every_token() {
        let db = JsonStore::new_mock();
        db.register_token("tok-a").await.unwrap();
        db.register_token("tok-b").await.unwrap();
        let push = PushService::new_mock();
        let service = ExpenseService::new(db, push.clone());

        let outcome = service
            .add_expense(NewExpense::new("Taxi", 20.0, "Bob", &["Alice", "Bob"]).unwrap())
            .await
            .unwrap();

        assert!(outcome.expense.id.is_some());
        let sent = push.sent_messages();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].body, "Bob added $20.0 for Taxi. Each owes $10.0");
    }

    #[tokio::test]
    async fn test_push_failure_does_not_fail_add() {
        let db = JsonStore::new_mock();
        db.register_token("tok-a").await.unwrap();
        let service = ExpenseService::new(
            db.clone(),
            PushService::new("http://127.0.0.1:1/push", "Test"),
        );

        let outcome = service
            .add_expense(NewExpense::new("Taxi", 20.0, "Bob", &["Bob"]).unwrap())
            .await
            .unwrap();

        assert_eq!(outcome.push_response["status"], "error");
        assert_eq!(db.expenses().await.len(), 1);
    }
}
