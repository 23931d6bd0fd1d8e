// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! HTTP client for the expense backend.
//!
//! Every response is decoded into an explicit schema; a body that does not
//! match is reported as [`NetworkError::Decode`] rather than trusted.

use crate::config::Config;
use crate::error::NetworkError;
use crate::models::{ExpenseList, ExpenseRecord, NewExpense, PushToken, RegisterTokenRequest};
use serde::Deserialize;

/// Backend API client.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client from configuration, applying the request timeout.
    pub fn from_config(config: &Config) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST /register-token
    pub async fn register_token(&self, token: &PushToken) -> Result<(), NetworkError> {
        let url = format!("{}/register-token", self.base_url);
        let body = RegisterTokenRequest {
            token: token.as_str().to_string(),
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        self.check_response(response).await?;
        Ok(())
    }

    /// GET /expenses
    pub async fn list_expenses(&self) -> Result<ExpenseList, NetworkError> {
        let url = format!("{}/expenses", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// POST /add-expense
    ///
    /// Returns the created record when the body carries one. Any 2xx counts
    /// as success even if the body has another shape.
    pub async fn add_expense(
        &self,
        expense: &NewExpense,
    ) -> Result<Option<ExpenseRecord>, NetworkError> {
        let url = format!("{}/add-expense", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(expense)
            .send()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        let response = self.check_response(response).await?;
        let body = response.bytes().await.unwrap_or_default();

        match serde_json::from_slice::<AddExpenseResponse>(&body) {
            Ok(parsed) => Ok(Some(parsed.expense)),
            Err(e) => {
                tracing::debug!(error = %e, "add-expense response carried no record");
                Ok(None)
            }
        }
    }

    /// Check response status and return error if not successful.
    async fn check_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, NetworkError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(status = %status, "Backend returned an error");

        Err(NetworkError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, NetworkError> {
        let response = self.check_response(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| NetworkError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| NetworkError::Decode(e.to_string()))
    }
}

/// Success body of `POST /add-expense`.
#[derive(Debug, Deserialize)]
struct AddExpenseResponse {
    expense: ExpenseRecord,
}
