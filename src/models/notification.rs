// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Notification permission, payload and delivery models.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// OS notification permission.
///
/// The client only ever observes `Undetermined` turning into one of the
/// other two; it never reverses a decision itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Undetermined,
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        self == PermissionState::Granted
    }
}

/// Operating system of the running device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceOs {
    Android,
    Ios,
    Other,
}

/// A notification as delivered by the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub identifier: String,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// The user's interaction with a notification (usually a tap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notification: Notification,
    pub action_identifier: String,
}

/// Event forwarded to the UI shell.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationEvent {
    /// Delivered while the app was in the foreground
    Received(Notification),
    /// Tapped by the user
    Tapped(NotificationResponse),
}

/// How a notification is presented while the app is foregrounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForegroundPresentation {
    pub show_alert: bool,
    pub play_sound: bool,
    pub set_badge: bool,
}

impl Default for ForegroundPresentation {
    fn default() -> Self {
        Self {
            show_alert: true,
            play_sound: true,
            set_badge: false,
        }
    }
}

/// Android notification channel importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelImportance {
    Default,
    High,
    Max,
}

/// Android notification channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChannel {
    pub id: String,
    pub name: String,
    pub importance: ChannelImportance,
}

impl NotificationChannel {
    /// The channel remote expense pushes are posted to.
    pub fn default_channel() -> Self {
        Self {
            id: "default".to_string(),
            name: "default".to_string(),
            importance: ChannelImportance::Max,
        }
    }
}

/// Locally scheduled notification (debug aid, no backend involved).
#[derive(Debug, Clone, PartialEq)]
pub struct LocalNotification {
    pub title: String,
    pub body: String,
    pub data: serde_json::Value,
    /// Delay before the notification fires
    pub trigger_after: Duration,
}

/// One message in an Expo push request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushMessage {
    pub to: String,
    pub sound: String,
    pub title: String,
    pub body: String,
}

impl PushMessage {
    pub fn new(to: &str, title: &str, body: &str) -> Self {
        Self {
            to: to.to_string(),
            sound: "default".to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}
