// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Expo push API client.
//!
//! Sends one message per registered token in a single request and hands
//! the provider's JSON answer back to the caller unchanged.

use crate::config::Config;
use crate::error::AppError;
use crate::models::PushMessage;
use std::sync::{Arc, Mutex, PoisonError};

/// Push sender. Offline instances record messages instead of sending them.
#[derive(Clone)]
pub struct PushService {
    http: Option<reqwest::Client>,
    push_url: String,
    title: String,
    /// Messages recorded in offline mode
    sent: Arc<Mutex<Vec<PushMessage>>>,
}

impl PushService {
    pub fn new(push_url: &str, title: &str) -> Self {
        Self {
            http: Some(reqwest::Client::new()),
            push_url: push_url.to_string(),
            title: title.to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.expo_push_url, &config.push_title)
    }

    /// Create an offline push service for testing.
    pub fn new_mock() -> Self {
        Self {
            http: None,
            push_url: "mock://push".to_string(),
            title: crate::config::DEFAULT_PUSH_TITLE.to_string(),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Messages recorded by an offline instance.
    pub fn sent_messages(&self) -> Vec<PushMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Send `body` to every token using the default title.
    pub async fn send(&self, tokens: &[String], body: &str) -> Result<serde_json::Value, AppError> {
        self.send_with_title(tokens, &self.title, body).await
    }

    /// Send `body` under `title` to every token.
    pub async fn send_with_title(
        &self,
        tokens: &[String],
        title: &str,
        body: &str,
    ) -> Result<serde_json::Value, AppError> {
        let messages: Vec<PushMessage> = tokens
            .iter()
            .map(|token| PushMessage::new(token, title, body))
            .collect();

        let Some(http) = &self.http else {
            let count = messages.len();
            self.sent
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend(messages);
            return Ok(serde_json::json!({ "status": "mock", "count": count }));
        };

        let response = http
            .post(&self.push_url)
            .json(&messages)
            .send()
            .await
            .map_err(|e| AppError::PushService(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, "Expo push request rejected");
            return Err(AppError::PushService(format!("HTTP {}: {}", status, body)));
        }

        let parsed = response
            .json()
            .await
            .map_err(|e| AppError::PushService(format!("JSON parse error: {}", e)))?;

        tracing::info!(count = messages.len(), "Push sent");
        Ok(parsed)
    }
}
