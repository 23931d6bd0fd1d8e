// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Push eligibility and permission check.

use crate::models::PermissionState;
use crate::platform::NotificationPlatform;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Decides whether this device may receive push notifications.
///
/// The OS dialog is shown at most once per gate, and the controller builds
/// one gate per cold start.
pub struct PermissionGate {
    platform: Arc<dyn NotificationPlatform>,
    prompted: AtomicBool,
}

impl PermissionGate {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        Self {
            platform,
            prompted: AtomicBool::new(false),
        }
    }

    /// Current permission, prompting the user if it was never decided.
    ///
    /// Never fails: an ineligible device or a platform error reads as
    /// `Denied`.
    pub async fn check_and_request(&self) -> PermissionState {
        if !self.platform.is_physical_device() {
            tracing::warn!("Push notifications need a physical device");
            return PermissionState::Denied;
        }

        let current = match self.platform.permission_status().await {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read notification permission");
                return PermissionState::Denied;
            }
        };

        if current != PermissionState::Undetermined {
            return current;
        }

        if self.prompted.swap(true, Ordering::SeqCst) {
            // Dialog already shown this run and dismissed without an answer.
            return PermissionState::Undetermined;
        }

        tracing::info!("Requesting notification permission");
        match self.platform.request_permission().await {
            Ok(answer) => {
                tracing::info!(permission = ?answer, "Notification permission answered");
                answer
            }
            Err(e) => {
                tracing::warn!(error = %e, "Notification permission request failed");
                PermissionState::Denied
            }
        }
    }
}
