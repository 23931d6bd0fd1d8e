// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process notification platform.
//!
//! Behaves like a device whose OS answers instantly. Every call is recorded
//! so tests can assert on prompts, token requests and listener releases.

use super::{NotificationCallback, NotificationPlatform, ResponseCallback, SubscriptionId};
use crate::error::PlatformError;
use crate::models::{
    DeviceOs, ForegroundPresentation, LocalNotification, Notification, NotificationChannel,
    NotificationResponse, PermissionState,
};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Deterministic [`NotificationPlatform`] for tests and desktop runs.
pub struct MockPlatform {
    state: Mutex<MockState>,
}

struct MockState {
    physical_device: bool,
    os: DeviceOs,
    permission: PermissionState,
    /// What the user answers when prompted
    prompt_answer: PermissionState,
    permission_query_fails: bool,
    token: Result<String, PlatformError>,
    response_listener_fails: bool,

    prompts: u32,
    token_requests: Vec<String>,
    received: BTreeMap<SubscriptionId, NotificationCallback>,
    tapped: BTreeMap<SubscriptionId, ResponseCallback>,
    next_subscription: u64,
    remove_calls: u32,
    channels: Vec<NotificationChannel>,
    presentation: Option<ForegroundPresentation>,
    scheduled: Vec<LocalNotification>,
}

impl Default for MockPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPlatform {
    /// A physical Android device that has never been asked for permission
    /// and whose user will grant it.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState {
                physical_device: true,
                os: DeviceOs::Android,
                permission: PermissionState::Undetermined,
                prompt_answer: PermissionState::Granted,
                permission_query_fails: false,
                token: Ok("ExponentPushToken[mock]".to_string()),
                response_listener_fails: false,
                prompts: 0,
                token_requests: Vec::new(),
                received: BTreeMap::new(),
                tapped: BTreeMap::new(),
                next_subscription: 1,
                remove_calls: 0,
                channels: Vec::new(),
                presentation: None,
                scheduled: Vec::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ─── Builders ────────────────────────────────────────────────

    /// Simulator or emulator without push support.
    pub fn simulator(self) -> Self {
        self.state().physical_device = false;
        self
    }

    pub fn with_os(self, os: DeviceOs) -> Self {
        self.state().os = os;
        self
    }

    /// Permission already decided before the app starts.
    pub fn with_permission(self, permission: PermissionState) -> Self {
        self.state().permission = permission;
        self
    }

    /// Answer the user gives to the permission dialog.
    pub fn with_prompt_answer(self, answer: PermissionState) -> Self {
        self.state().prompt_answer = answer;
        self
    }

    /// Reading or requesting permission fails.
    pub fn with_failing_permission_query(self) -> Self {
        self.state().permission_query_fails = true;
        self
    }

    pub fn with_token(self, token: &str) -> Self {
        self.set_token(Ok(token.to_string()));
        self
    }

    pub fn with_token_error(self, detail: &str) -> Self {
        self.set_token(Err(PlatformError::Failed(detail.to_string())));
        self
    }

    /// Registering the tap listener fails.
    pub fn with_failing_response_listener(self) -> Self {
        self.state().response_listener_fails = true;
        self
    }

    // ─── Runtime control ─────────────────────────────────────────

    /// Change what the next token request returns (e.g. rotation).
    pub fn set_token(&self, token: Result<String, PlatformError>) {
        self.state().token = token;
    }

    /// Permission changed outside the app (system settings).
    pub fn set_permission(&self, permission: PermissionState) {
        self.state().permission = permission;
    }

    /// Deliver a foreground notification to every live receive listener.
    /// Returns how many listeners were called.
    pub fn deliver(&self, notification: Notification) -> usize {
        let callbacks: Vec<NotificationCallback> =
            self.state().received.values().cloned().collect();
        for callback in &callbacks {
            callback(notification.clone());
        }
        callbacks.len()
    }

    /// Simulate the user tapping a notification.
    /// Returns how many listeners were called.
    pub fn tap(&self, response: NotificationResponse) -> usize {
        let callbacks: Vec<ResponseCallback> = self.state().tapped.values().cloned().collect();
        for callback in &callbacks {
            callback(response.clone());
        }
        callbacks.len()
    }

    /// Fire every scheduled local notification as a foreground delivery.
    pub fn fire_scheduled(&self) -> usize {
        let scheduled = std::mem::take(&mut self.state().scheduled);
        let mut delivered = 0;
        for (index, local) in scheduled.into_iter().enumerate() {
            delivered += self.deliver(Notification {
                identifier: format!("local-{}", index + 1),
                title: Some(local.title),
                body: Some(local.body),
                data: local.data,
            });
        }
        delivered
    }

    // ─── Inspection ──────────────────────────────────────────────

    pub fn prompt_count(&self) -> u32 {
        self.state().prompts
    }

    /// Project ids of every token request, in order.
    pub fn token_requests(&self) -> Vec<String> {
        self.state().token_requests.clone()
    }

    /// Number of `remove_subscription` calls.
    pub fn remove_calls(&self) -> u32 {
        self.state().remove_calls
    }

    /// Listeners currently registered across both streams.
    pub fn active_listeners(&self) -> usize {
        let state = self.state();
        state.received.len() + state.tapped.len()
    }

    pub fn channels(&self) -> Vec<NotificationChannel> {
        self.state().channels.clone()
    }

    pub fn presentation(&self) -> Option<ForegroundPresentation> {
        self.state().presentation
    }

    pub fn scheduled(&self) -> Vec<LocalNotification> {
        self.state().scheduled.clone()
    }

    fn next_id(state: &mut MockState) -> SubscriptionId {
        let id = SubscriptionId::new(state.next_subscription);
        state.next_subscription += 1;
        id
    }
}

#[async_trait]
impl NotificationPlatform for MockPlatform {
    fn is_physical_device(&self) -> bool {
        self.state().physical_device
    }

    fn os(&self) -> DeviceOs {
        self.state().os
    }

    async fn permission_status(&self) -> Result<PermissionState, PlatformError> {
        let state = self.state();
        if state.permission_query_fails {
            return Err(PlatformError::Failed("permission query failed".to_string()));
        }
        Ok(state.permission)
    }

    async fn request_permission(&self) -> Result<PermissionState, PlatformError> {
        let mut state = self.state();
        if state.permission_query_fails {
            return Err(PlatformError::Failed("permission request failed".to_string()));
        }
        state.prompts += 1;
        // The OS only asks while undecided; afterwards it echoes the decision.
        if state.permission == PermissionState::Undetermined {
            state.permission = state.prompt_answer;
        }
        Ok(state.permission)
    }

    async fn push_token(&self, project_id: &str) -> Result<String, PlatformError> {
        let mut state = self.state();
        state.token_requests.push(project_id.to_string());
        if !state.physical_device {
            return Err(PlatformError::Unsupported("push tokens on a simulator"));
        }
        state.token.clone()
    }

    async fn set_notification_channel(
        &self,
        channel: &NotificationChannel,
    ) -> Result<(), PlatformError> {
        let mut state = self.state();
        if state.os != DeviceOs::Android {
            return Err(PlatformError::Unsupported("notification channels"));
        }
        state.channels.retain(|c| c.id != channel.id);
        state.channels.push(channel.clone());
        Ok(())
    }

    fn set_foreground_presentation(&self, presentation: ForegroundPresentation) {
        self.state().presentation = Some(presentation);
    }

    fn add_received_listener(
        &self,
        callback: NotificationCallback,
    ) -> Result<SubscriptionId, PlatformError> {
        let mut state = self.state();
        let id = Self::next_id(&mut state);
        state.received.insert(id, callback);
        Ok(id)
    }

    fn add_response_listener(
        &self,
        callback: ResponseCallback,
    ) -> Result<SubscriptionId, PlatformError> {
        let mut state = self.state();
        if state.response_listener_fails {
            return Err(PlatformError::Failed("response listener unavailable".to_string()));
        }
        let id = Self::next_id(&mut state);
        state.tapped.insert(id, callback);
        Ok(id)
    }

    fn remove_subscription(&self, id: SubscriptionId) {
        let mut state = self.state();
        state.remove_calls += 1;
        state.received.remove(&id);
        state.tapped.remove(&id);
    }

    async fn schedule_local(
        &self,
        notification: &LocalNotification,
    ) -> Result<String, PlatformError> {
        let mut state = self.state();
        state.scheduled.push(notification.clone());
        Ok(format!("local-{}", state.scheduled.len()))
    }
}
