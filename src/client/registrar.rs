// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push token registration with the backend.

use crate::client::api::BackendClient;
use crate::error::NetworkError;
use crate::models::PushToken;

/// Sends push tokens to the backend so it can address this device.
///
/// The backend deduplicates, so repeated registration of one token is
/// harmless. Nothing is retried here.
#[derive(Clone)]
pub struct TokenRegistrar {
    api: BackendClient,
}

impl TokenRegistrar {
    pub fn new(api: BackendClient) -> Self {
        Self { api }
    }

    pub async fn register(&self, token: &PushToken) -> Result<(), NetworkError> {
        match self.api.register_token(token).await {
            Ok(()) => {
                tracing::info!("Push token registered with backend");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Push token registration failed");
                Err(e)
            }
        }
    }
}
