// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Seam to the OS push notification service.
//!
//! The client core only talks to the device through [`NotificationPlatform`].
//! Mobile shells implement it over the native SDK; [`MockPlatform`] is a
//! deterministic in-process implementation for tests and desktop runs.

pub mod mock;

pub use mock::MockPlatform;

use crate::error::PlatformError;
use crate::models::{
    DeviceOs, ForegroundPresentation, LocalNotification, Notification, NotificationChannel,
    NotificationResponse, PermissionState,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Called for each notification delivered while the app is foregrounded.
pub type NotificationCallback = Arc<dyn Fn(Notification) + Send + Sync>;

/// Called for each notification the user interacts with.
pub type ResponseCallback = Arc<dyn Fn(NotificationResponse) + Send + Sync>;

/// Handle to a live listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Operations the client core needs from the OS notification service.
#[async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// False on simulators and emulators without push support.
    fn is_physical_device(&self) -> bool;

    fn os(&self) -> DeviceOs;

    /// Current permission without prompting.
    async fn permission_status(&self) -> Result<PermissionState, PlatformError>;

    /// Show the OS permission dialog and return the user's answer.
    async fn request_permission(&self) -> Result<PermissionState, PlatformError>;

    /// Ask the push service for this installation's current token.
    async fn push_token(&self, project_id: &str) -> Result<String, PlatformError>;

    /// Create or update an Android notification channel.
    async fn set_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<(), PlatformError>;

    /// How notifications are shown while the app is in the foreground.
    fn set_foreground_presentation(&self, presentation: ForegroundPresentation);

    fn add_received_listener(
        &self,
        callback: NotificationCallback,
    ) -> Result<SubscriptionId, PlatformError>;

    fn add_response_listener(
        &self,
        callback: ResponseCallback,
    ) -> Result<SubscriptionId, PlatformError>;

    /// Release a listener. Unknown ids are ignored.
    fn remove_subscription(&self, id: SubscriptionId);

    /// Schedule a local notification; returns its platform identifier.
    async fn schedule_local(&self, notification: &LocalNotification)
        -> Result<String, PlatformError>;
}
