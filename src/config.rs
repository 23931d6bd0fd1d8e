// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! One `Config` serves the client core (backend URL, push project id) and
//! the backend binaries (port, data directory, Expo endpoint).

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Expo push endpoint.
pub const EXPO_PUSH_URL: &str = "https://exp.host/--/api/v2/push/send";

/// Default title of pushed expense notifications.
pub const DEFAULT_PUSH_TITLE: &str = "Expense Splitter";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Client ---
    /// Base URL of the expense backend (no trailing slash)
    pub api_url: String,
    /// Push project id; `None` disables token acquisition
    pub project_id: Option<String>,
    /// Timeout for each backend request
    pub http_timeout: Duration,

    // --- Backend ---
    /// Server port
    pub port: u16,
    /// Directory holding tokens.json and expenses.json
    pub data_dir: PathBuf,
    /// Expo push send endpoint
    pub expo_push_url: String,
    /// Title used for pushed notifications
    pub push_title: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());
        let api_url = normalize_url("API_URL", &api_url)?;

        let expo_push_url = env::var("EXPO_PUSH_URL").unwrap_or_else(|_| EXPO_PUSH_URL.to_string());
        let expo_push_url = normalize_url("EXPO_PUSH_URL", &expo_push_url)?;

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", raw.clone()))?,
            ),
            Err(_) => Duration::from_secs(10),
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw.clone()))?,
            Err(_) => 8000,
        };

        Ok(Self {
            api_url,
            project_id: env::var("EXPO_PROJECT_ID")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            http_timeout,
            port,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            expo_push_url,
            push_title: env::var("PUSH_TITLE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_PUSH_TITLE.to_string()),
        })
    }

    /// Config for tests: points at a local backend that may not exist.
    pub fn test_default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".to_string(),
            project_id: Some("proj-1".to_string()),
            http_timeout: Duration::from_secs(5),
            port: 8000,
            data_dir: PathBuf::from("."),
            expo_push_url: EXPO_PUSH_URL.to_string(),
            push_title: DEFAULT_PUSH_TITLE.to_string(),
        }
    }

    /// Same config pointed at another backend.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }
}

/// Check that `raw` is an absolute http(s) URL and strip any trailing slash.
fn normalize_url(name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw.trim())
        .map_err(|e| ConfigError::Invalid(name, format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid(name, raw.to_string()));
    }
    Ok(raw.trim().trim_end_matches('/').to_string())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
