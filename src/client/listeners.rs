// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification listener lifecycle.

use crate::error::PlatformError;
use crate::platform::{
    NotificationCallback, NotificationPlatform, ResponseCallback, SubscriptionId,
};
use std::sync::Arc;

/// The two listener handles owned by a mounted screen.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListenerSubscriptions {
    received: Option<SubscriptionId>,
    tapped: Option<SubscriptionId>,
}

impl ListenerSubscriptions {
    /// Number of handles still held.
    pub fn live(&self) -> usize {
        usize::from(self.received.is_some()) + usize::from(self.tapped.is_some())
    }
}

/// `start` could only register some listeners.
///
/// The handles that were created are returned so the owner can release them.
#[derive(Debug, thiserror::Error)]
#[error("Failed to start notification listeners: {error}")]
pub struct PartialStart {
    pub subscriptions: ListenerSubscriptions,
    pub error: PlatformError,
}

/// Registers and releases the foreground and tap listeners.
#[derive(Clone)]
pub struct ListenerBridge {
    platform: Arc<dyn NotificationPlatform>,
}

impl ListenerBridge {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        Self { platform }
    }

    /// Subscribe to both streams.
    pub fn start(
        &self,
        on_received: NotificationCallback,
        on_tapped: ResponseCallback,
    ) -> Result<ListenerSubscriptions, PartialStart> {
        let mut subscriptions = ListenerSubscriptions::default();

        match self.platform.add_received_listener(on_received) {
            Ok(id) => subscriptions.received = Some(id),
            Err(error) => {
                return Err(PartialStart {
                    subscriptions,
                    error,
                })
            }
        }

        match self.platform.add_response_listener(on_tapped) {
            Ok(id) => subscriptions.tapped = Some(id),
            Err(error) => {
                return Err(PartialStart {
                    subscriptions,
                    error,
                })
            }
        }

        tracing::debug!("Notification listeners started");
        Ok(subscriptions)
    }

    /// Release every handle still held. Returns how many were released.
    ///
    /// Handles are taken out, so stopping twice releases nothing the
    /// second time.
    pub fn stop(&self, subscriptions: &mut ListenerSubscriptions) -> usize {
        let mut released = 0;
        for id in [subscriptions.received.take(), subscriptions.tapped.take()]
            .into_iter()
            .flatten()
        {
            self.platform.remove_subscription(id);
            released += 1;
        }
        if released > 0 {
            tracing::debug!(released, "Notification listeners stopped");
        }
        released
    }
}
