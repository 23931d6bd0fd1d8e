// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push token model and registration payloads.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Platform-issued push token for this installation.
///
/// Opaque and never empty. A newer token supersedes an older one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PushToken(String);

impl PushToken {
    /// Wrap a platform token, rejecting blank values.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PushToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /register-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct RegisterTokenRequest {
    pub token: String,
}

/// Response of `POST /register-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "app/generated/")
)]
pub struct RegisterTokenResponse {
    /// "ok" for a new token, "exists" for a known one
    pub status: String,
    pub message: String,
}

/// Response of `GET /tokens`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenList {
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_token_rejects_blank() {
        assert!(PushToken::new("").is_none());
        assert!(PushToken::new("   ").is_none());
        assert_eq!(
            PushToken::new("ExponentPushToken[abc]").unwrap().as_str(),
            "ExponentPushToken[abc]"
        );
    }

    #[test]
    fn test_push_token_serializes_as_plain_string() {
        let token = PushToken::new("tok-abc").unwrap();
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"tok-abc\"");
    }
}
