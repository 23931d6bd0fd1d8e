// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push token acquisition.
//!
//! Tokens are never cached here: the platform may rotate them, so every
//! call asks again and the caller treats each result as the current token.

use crate::error::TokenError;
use crate::models::PushToken;
use crate::platform::NotificationPlatform;
use std::sync::Arc;

/// Obtains this installation's push token from the platform.
pub struct TokenProvider {
    platform: Arc<dyn NotificationPlatform>,
}

impl TokenProvider {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        Self { platform }
    }

    /// Request a fresh token scoped to `project_id`.
    ///
    /// Checks run cheapest first so that a misconfiguration is reported
    /// without touching the push service.
    pub async fn obtain_token(&self, project_id: Option<&str>) -> Result<PushToken, TokenError> {
        if !self.platform.is_physical_device() {
            return Err(TokenError::NotEligible);
        }

        let project_id = project_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(TokenError::MissingProjectId)?;

        match self.platform.permission_status().await {
            Ok(state) if state.is_granted() => {}
            Ok(_) => return Err(TokenError::PermissionDenied),
            Err(e) => return Err(TokenError::Platform(e.to_string())),
        }

        let raw = self
            .platform
            .push_token(project_id)
            .await
            .map_err(|e| TokenError::Platform(e.to_string()))?;

        let token = PushToken::new(raw).ok_or_else(|| {
            TokenError::Platform("push service returned an empty token".to_string())
        })?;

        tracing::info!(project_id, "Obtained push token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PermissionState;
    use crate::platform::MockPlatform;

    fn granted() -> MockPlatform {
        MockPlatform::new().with_permission(PermissionState::Granted)
    }

    #[tokio::test]
    async fn test_obtains_token_for_project() {
        let platform = Arc::new(granted().with_token("tok-abc"));
        let provider = TokenProvider::new(platform.clone());

        let token = provider.obtain_token(Some("proj-1")).await.unwrap();

        assert_eq!(token.as_str(), "tok-abc");
        assert_eq!(platform.token_requests(), vec!["proj-1"]);
    }

    #[tokio::test]
    async fn test_simulator_is_not_eligible() {
        let platform = Arc::new(granted().simulator());
        let provider = TokenProvider::new(platform.clone());

        assert_eq!(
            provider.obtain_token(Some("proj-1")).await,
            Err(TokenError::NotEligible)
        );
        assert!(platform.token_requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_project_id_is_a_configuration_error() {
        let platform = Arc::new(granted());
        let provider = TokenProvider::new(platform.clone());

        for project_id in [None, Some(""), Some("   ")] {
            let err = provider.obtain_token(project_id).await.unwrap_err();
            assert_eq!(err, TokenError::MissingProjectId);
            assert!(err.is_configuration_error());
        }
        assert!(platform.token_requests().is_empty());
    }

    #[tokio::test]
    async fn test_permission_must_be_granted() {
        for state in [PermissionState::Undetermined, PermissionState::Denied] {
            let platform = Arc::new(MockPlatform::new().with_permission(state));
            let provider = TokenProvider::new(platform.clone());

            assert_eq!(
                provider.obtain_token(Some("proj-1")).await,
                Err(TokenError::PermissionDenied)
            );
            assert!(platform.token_requests().is_empty());
        }
    }

    #[tokio::test]
    async fn test_platform_failure_is_distinct_and_transient() {
        let platform = Arc::new(granted().with_token_error("service unavailable"));
        let provider = TokenProvider::new(platform);

        let err = provider.obtain_token(Some("proj-1")).await.unwrap_err();

        assert!(matches!(err, TokenError::Platform(ref d) if d.contains("service unavailable")));
        assert!(!err.is_configuration_error());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected() {
        let platform = Arc::new(granted().with_token(""));
        let provider = TokenProvider::new(platform);

        assert!(matches!(
            provider.obtain_token(Some("proj-1")).await,
            Err(TokenError::Platform(_))
        ));
    }

    #[tokio::test]
    async fn test_rotated_token_is_returned_without_caching() {
        let platform = Arc::new(granted().with_token("tok-1"));
        let provider = TokenProvider::new(platform.clone());

        let first = provider.obtain_token(Some("proj-1")).await.unwrap();
        platform.set_token(Ok("tok-2".to_string()));
        let second = provider.obtain_token(Some("proj-1")).await.unwrap();

        assert_eq!(first.as_str(), "tok-1");
        assert_eq!(second.as_str(), "tok-2");
        assert_eq!(platform.token_requests().len(), 2);
    }
}
