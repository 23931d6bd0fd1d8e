// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON file store for registered tokens and expenses.
//!
//! Provides typed operations for:
//! - Tokens (deduplicated push tokens, registration order)
//! - Expenses (append-only, insertion order)
//!
//! Each mutation rewrites the affected file through a temp file + rename so
//! a crash never leaves a half-written document behind.

use crate::db::files;
use crate::error::AppError;
use crate::models::{ExpenseList, ExpenseRecord, NewExpense, TokenList};
use crate::time_utils::created_at_now;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Token and expense store.
#[derive(Clone)]
pub struct JsonStore {
    /// `None` keeps everything in memory
    dir: Option<PathBuf>,
    inner: Arc<Mutex<StoreState>>,
}

#[derive(Default)]
struct StoreState {
    tokens: Vec<String>,
    expenses: Vec<ExpenseRecord>,
}

impl JsonStore {
    /// Open (or create) the store in `dir`.
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create {}: {}", dir.display(), e)))?;

        let tokens: TokenList = load_or_default(&dir.join(files::TOKENS)).await?;
        let expenses: ExpenseList = load_or_default(&dir.join(files::EXPENSES)).await?;

        tracing::info!(
            dir = %dir.display(),
            tokens = tokens.tokens.len(),
            expenses = expenses.len(),
            "Opened JSON store"
        );

        Ok(Self {
            dir: Some(dir),
            inner: Arc::new(Mutex::new(StoreState {
                tokens: tokens.tokens,
                expenses: expenses.expenses,
            })),
        })
    }

    /// Create an in-memory store for testing (offline mode).
    pub fn new_mock() -> Self {
        Self {
            dir: None,
            inner: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    // ─── Token Operations ────────────────────────────────────────

    /// Register a push token. Returns `false` if it was already known.
    pub async fn register_token(&self, token: &str) -> Result<bool, AppError> {
        let mut state = self.inner.lock().await;
        if state.tokens.iter().any(|t| t == token) {
            return Ok(false);
        }

        state.tokens.push(token.to_string());
        let snapshot = TokenList {
            tokens: state.tokens.clone(),
        };
        if let Err(e) = self.persist(files::TOKENS, &snapshot).await {
            state.tokens.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// All registered tokens, in registration order.
    pub async fn tokens(&self) -> Vec<String> {
        self.inner.lock().await.tokens.clone()
    }

    // ─── Expense Operations ──────────────────────────────────────

    /// Store an expense, assigning its id and creation time.
    pub async fn add_expense(&self, expense: NewExpense) -> Result<ExpenseRecord, AppError> {
        let record = expense.into_record(
            Some(uuid::Uuid::new_v4().to_string()),
            Some(created_at_now()),
        );

        let mut state = self.inner.lock().await;
        state.expenses.push(record.clone());
        let snapshot = ExpenseList {
            expenses: state.expenses.clone(),
        };
        if let Err(e) = self.persist(files::EXPENSES, &snapshot).await {
            state.expenses.pop();
            return Err(e);
        }
        Ok(record)
    }

    /// All expenses, in insertion order.
    pub async fn expenses(&self) -> ExpenseList {
        ExpenseList {
            expenses: self.inner.lock().await.expenses.clone(),
        }
    }

    /// Write `value` to `name` atomically. No-op for in-memory stores.
    async fn persist<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let Some(dir) = &self.dir else {
            return Ok(());
        };

        let path = dir.join(name);
        let tmp = dir.join(format!("{}.tmp", name));
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode {}: {}", name, e)))?;

        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| {
                AppError::Storage(format!("Failed to replace {}: {}", path.display(), e))
            })?;
        Ok(())
    }
}

/// Read a JSON document, treating a missing file as empty.
async fn load_or_default<T>(path: &Path) -> Result<T, AppError>
where
    T: Default + for<'de> serde::Deserialize<'de>,
{
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("Corrupt {}: {}", path.display(), e))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(AppError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}
