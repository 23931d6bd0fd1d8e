// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense list mirror kept in sync with the backend.
//!
//! The mirror is only ever replaced whole, by a successful fetch. Writes are
//! never merged locally: after an add the list is fetched again and the
//! server's answer becomes the mirror.

use crate::client::api::BackendClient;
use crate::error::{AddExpenseError, NetworkError};
use crate::models::{ExpenseList, ExpenseRecord, NewExpense};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Shared "screen still mounted" flag.
///
/// Responses that land after unmount are handed back to the caller but
/// never written to released state.
#[derive(Debug, Clone)]
pub struct MountFlag(Arc<AtomicBool>);

impl MountFlag {
    pub fn new(mounted: bool) -> Self {
        Self(Arc::new(AtomicBool::new(mounted)))
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn set(&self, mounted: bool) {
        self.0.store(mounted, Ordering::SeqCst);
    }
}

/// Fetches and submits expenses, maintaining the local mirror.
#[derive(Clone)]
pub struct ExpenseSyncClient {
    api: BackendClient,
    mirror: Arc<watch::Sender<ExpenseList>>,
    mounted: MountFlag,
}

impl ExpenseSyncClient {
    /// Standalone client, considered mounted for its whole life.
    pub fn new(api: BackendClient) -> Self {
        Self::with_mount_flag(api, MountFlag::new(true))
    }

    /// Client whose mirror writes are gated by `mounted`.
    pub fn with_mount_flag(api: BackendClient, mounted: MountFlag) -> Self {
        let (mirror, _) = watch::channel(ExpenseList::default());
        Self {
            api,
            mirror: Arc::new(mirror),
            mounted,
        }
    }

    /// Current mirror contents.
    pub fn mirror(&self) -> ExpenseList {
        self.mirror.borrow().clone()
    }

    /// Watch the mirror; a new value is published on every replacement.
    pub fn subscribe(&self) -> watch::Receiver<ExpenseList> {
        self.mirror.subscribe()
    }

    /// Fetch the authoritative list and replace the mirror with it.
    ///
    /// On failure the mirror is left exactly as it was.
    pub async fn fetch_all(&self) -> Result<ExpenseList, NetworkError> {
        let list = match self.api.list_expenses().await {
            Ok(list) => list,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to fetch expenses");
                return Err(e);
            }
        };

        if self.mounted.is_mounted() {
            self.mirror.send_replace(list.clone());
            tracing::debug!(count = list.len(), "Expense mirror replaced");
        } else {
            tracing::debug!("Discarding expense list that arrived after unmount");
        }

        Ok(list)
    }

    /// Validate and submit a new expense, then re-fetch the list.
    ///
    /// Invalid input is rejected before any request is made. A failed
    /// re-fetch is logged but does not fail the add, since the write itself
    /// succeeded.
    pub async fn add<S: AsRef<str>>(
        &self,
        description: &str,
        amount: f64,
        added_by: &str,
        participants: &[S],
    ) -> Result<ExpenseRecord, AddExpenseError> {
        let expense = NewExpense::new(description, amount, added_by, participants)?;

        let created = match self.api.add_expense(&expense).await {
            Ok(created) => created,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to add expense");
                return Err(e.into());
            }
        };

        let record = created.unwrap_or_else(|| expense.into_record(None, None));
        tracing::info!(
            id = record.id.as_deref().unwrap_or("unknown"),
            amount = record.amount,
            "Expense added"
        );

        if let Err(e) = self.fetch_all().await {
            tracing::warn!(error = %e, "Re-fetch after add failed, mirror unchanged");
        }

        Ok(record)
    }
}
