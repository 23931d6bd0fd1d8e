// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expense records, the list wire shape, and the input form.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Expense record as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct ExpenseRecord {
    /// Server-assigned id (absent until the backend confirms the write)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// What the money was spent on
    pub description: String,
    /// Amount spent, finite and non-negative
    pub amount: f64,
    /// Who paid
    pub added_by: String,
    /// Who shares the cost
    pub participants: Vec<String>,
    /// When the backend stored the record (RFC 3339, UTC)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Ordered expense list, in server insertion order.
///
/// This is also the body of `GET /expenses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct ExpenseList {
    pub expenses: Vec<ExpenseRecord>,
}

impl ExpenseList {
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.expenses.iter()
    }
}

impl From<Vec<ExpenseRecord>> for ExpenseList {
    fn from(expenses: Vec<ExpenseRecord>) -> Self {
        Self { expenses }
    }
}

/// A validated expense that has not been confirmed by the backend yet.
///
/// Serializes to the `POST /add-expense` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub added_by: String,
    pub participants: Vec<String>,
}

impl NewExpense {
    /// Validate user input.
    ///
    /// Text fields are trimmed. Participant names are trimmed, blank names
    /// dropped and duplicates removed keeping the first occurrence.
    pub fn new<S: AsRef<str>>(
        description: &str,
        amount: f64,
        added_by: &str,
        participants: &[S],
    ) -> Result<Self, ValidationError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        if !amount.is_finite() || amount < 0.0 {
            return Err(ValidationError::InvalidAmount(amount));
        }

        let added_by = added_by.trim();
        if added_by.is_empty() {
            return Err(ValidationError::EmptyAddedBy);
        }

        let mut names: Vec<String> = Vec::with_capacity(participants.len());
        for name in participants.iter().map(|p| p.as_ref().trim()) {
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        if names.is_empty() {
            return Err(ValidationError::NoParticipants);
        }

        Ok(Self {
            description: description.to_string(),
            amount,
            added_by: added_by.to_string(),
            participants: names,
        })
    }

    /// Each participant's share, rounded to cents.
    pub fn split_amount(&self) -> f64 {
        let share = self.amount / self.participants.len().max(1) as f64;
        (share * 100.0).round() / 100.0
    }

    /// Turn into a record, attaching server-side fields.
    pub fn into_record(self, id: Option<String>, created_at: Option<String>) -> ExpenseRecord {
        ExpenseRecord {
            id,
            description: self.description,
            amount: self.amount,
            added_by: self.added_by,
            participants: self.participants,
            created_at,
        }
    }
}

/// Text the user has typed but not yet submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseForm {
    pub description: String,
    /// Raw amount text as typed
    pub amount: String,
    pub added_by: String,
    /// Kept across submissions
    pub participants: Vec<String>,
}

impl ExpenseForm {
    /// Form with a fixed participant list.
    pub fn with_participants<S: Into<String>>(participants: impl IntoIterator<Item = S>) -> Self {
        Self {
            participants: participants.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Parse the amount text.
    pub fn parse_amount(&self) -> Result<f64, ValidationError> {
        let raw = self.amount.trim();
        raw.parse::<f64>()
            .map_err(|_| ValidationError::UnparsableAmount(raw.to_string()))
    }

    /// Clear the fields that describe one expense.
    pub fn clear(&mut self) {
        self.description.clear();
        self.amount.clear();
        self.added_by.clear();
    }
}
