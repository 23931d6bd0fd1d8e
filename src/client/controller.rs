// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen-level orchestration of the client core.
//!
//! On mount the controller runs permission → token → registration once,
//! starts the notification listeners and fetches the expense list. Push
//! setup is best effort: any failure is logged and recorded in the
//! [`MountReport`], and the controller still ends up `Ready` so the expense
//! list stays usable.

use crate::client::api::BackendClient;
use crate::client::expense_sync::{ExpenseSyncClient, MountFlag};
use crate::client::listeners::{ListenerBridge, ListenerSubscriptions};
use crate::client::permission::PermissionGate;
use crate::client::push_token::TokenProvider;
use crate::client::registrar::TokenRegistrar;
use crate::config::Config;
use crate::error::{AddExpenseError, NetworkError, PlatformError, RegistrationError, TokenError};
use crate::models::{
    DeviceOs, ExpenseForm, ExpenseList, ExpenseRecord, ForegroundPresentation, LocalNotification,
    Notification, NotificationChannel, NotificationEvent, NotificationResponse, PermissionState,
    PushToken,
};
use crate::platform::{NotificationCallback, NotificationPlatform, ResponseCallback};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Where the controller is in its mount sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AcquiringPermission,
    AcquiringToken,
    Registering,
    Ready,
    Unmounted,
}

/// Outcome of each mount step.
#[derive(Debug, Clone, PartialEq)]
pub struct MountReport {
    pub permission: PermissionState,
    /// The registered token, or why push setup stopped
    pub registration: Result<PushToken, RegistrationError>,
    /// Both listeners are live
    pub listening: bool,
    /// Number of expenses in the initial fetch
    pub initial_fetch: Result<usize, NetworkError>,
}

/// Owns the client core components for one mounted screen.
pub struct AppController {
    config: Config,
    platform: Arc<dyn NotificationPlatform>,
    gate: PermissionGate,
    tokens: TokenProvider,
    registrar: TokenRegistrar,
    listeners: ListenerBridge,
    sync: ExpenseSyncClient,
    mounted: MountFlag,
    state: ControllerState,
    subscriptions: ListenerSubscriptions,
    push_token: Option<PushToken>,
    report: Option<MountReport>,
    form: ExpenseForm,
    /// Moved into the listener callbacks on mount
    events_tx: Option<mpsc::UnboundedSender<NotificationEvent>>,
    events_rx: mpsc::UnboundedReceiver<NotificationEvent>,
}

impl AppController {
    pub fn new(
        config: Config,
        platform: Arc<dyn NotificationPlatform>,
    ) -> Result<Self, NetworkError> {
        let api = BackendClient::from_config(&config)?;
        let mounted = MountFlag::new(false);
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(Self {
            gate: PermissionGate::new(platform.clone()),
            tokens: TokenProvider::new(platform.clone()),
            registrar: TokenRegistrar::new(api.clone()),
            listeners: ListenerBridge::new(platform.clone()),
            sync: ExpenseSyncClient::with_mount_flag(api, mounted.clone()),
            config,
            platform,
            mounted,
            state: ControllerState::Idle,
            subscriptions: ListenerSubscriptions::default(),
            push_token: None,
            report: None,
            form: ExpenseForm::default(),
            events_tx: Some(events_tx),
            events_rx,
        })
    }

    /// Start with a pre-filled form (e.g. a fixed participant list).
    pub fn with_form(mut self, form: ExpenseForm) -> Self {
        self.form = form;
        self
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_listening(&self) -> bool {
        self.subscriptions.live() == 2
    }

    /// The most recently obtained push token.
    pub fn push_token(&self) -> Option<&PushToken> {
        self.push_token.as_ref()
    }

    pub fn report(&self) -> Option<&MountReport> {
        self.report.as_ref()
    }

    pub fn form(&self) -> &ExpenseForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ExpenseForm {
        &mut self.form
    }

    /// Sync client for the UI to render or watch the mirror.
    pub fn expenses(&self) -> &ExpenseSyncClient {
        &self.sync
    }

    /// Next notification event, if one is waiting.
    pub fn try_next_event(&mut self) -> Option<NotificationEvent> {
        self.events_rx.try_recv().ok()
    }

    /// Wait for the next notification event.
    ///
    /// Returns `None` once unmounted and every queued event has been read.
    pub async fn next_event(&mut self) -> Option<NotificationEvent> {
        self.events_rx.recv().await
    }

    /// Run the mount sequence. Later calls return the first report.
    pub async fn mount(&mut self) -> MountReport {
        if let Some(report) = &self.report {
            return report.clone();
        }

        self.mounted.set(true);
        self.platform
            .set_foreground_presentation(ForegroundPresentation::default());

        let (permission, registration) = self.register_for_push().await;
        if let Err(e) = &registration {
            report_registration_failure(e);
        }
        self.configure_channels().await;
        self.state = ControllerState::Ready;

        let listening = self.start_listeners();

        let initial_fetch = self.sync.fetch_all().await.map(|list| list.len());

        let report = MountReport {
            permission,
            registration,
            listening,
            initial_fetch,
        };
        self.report = Some(report.clone());
        report
    }

    /// Permission → token → registration, stopping at the first failure.
    async fn register_for_push(
        &mut self,
    ) -> (PermissionState, Result<PushToken, RegistrationError>) {
        self.state = ControllerState::AcquiringPermission;
        let permission = self.gate.check_and_request().await;
        if !permission.is_granted() {
            let err = if self.platform.is_physical_device() {
                TokenError::PermissionDenied
            } else {
                TokenError::NotEligible
            };
            return (permission, Err(err.into()));
        }

        self.state = ControllerState::AcquiringToken;
        let token = match self
            .tokens
            .obtain_token(self.config.project_id.as_deref())
            .await
        {
            Ok(token) => token,
            Err(e) => return (permission, Err(e.into())),
        };
        // A new token supersedes whatever was held before.
        self.push_token = Some(token.clone());

        self.state = ControllerState::Registering;
        match self.registrar.register(&token).await {
            Ok(()) => (permission, Ok(token)),
            Err(e) => (permission, Err(e.into())),
        }
    }

    async fn configure_channels(&self) {
        if self.platform.os() != DeviceOs::Android {
            return;
        }
        if let Err(e) = self
            .platform
            .set_notification_channel(&NotificationChannel::default_channel())
            .await
        {
            tracing::warn!(error = %e, "Failed to configure notification channel");
        }
    }

    /// Subscribe both listeners. Events are forwarded only while mounted.
    fn start_listeners(&mut self) -> bool {
        let Some(tx) = self.events_tx.take() else {
            return false;
        };

        let mounted = self.mounted.clone();
        let tapped_tx = tx.clone();
        let on_received: NotificationCallback = Arc::new(move |notification: Notification| {
            if mounted.is_mounted() {
                tracing::info!(id = %notification.identifier, "Notification received");
                let _ = tx.send(NotificationEvent::Received(notification));
            }
        });

        let mounted = self.mounted.clone();
        let on_tapped: ResponseCallback = Arc::new(move |response: NotificationResponse| {
            if mounted.is_mounted() {
                tracing::info!(
                    id = %response.notification.identifier,
                    action = %response.action_identifier,
                    "Notification response"
                );
                let _ = tapped_tx.send(NotificationEvent::Tapped(response));
            }
        });

        match self.listeners.start(on_received, on_tapped) {
            Ok(subscriptions) => {
                self.subscriptions = subscriptions;
                true
            }
            Err(partial) => {
                tracing::warn!(
                    error = %partial.error,
                    "Notification listeners only partly started"
                );
                self.subscriptions = partial.subscriptions;
                false
            }
        }
    }

    /// Submit the form. The form is cleared only if the write succeeds.
    pub async fn submit_expense(&mut self) -> Result<ExpenseRecord, AddExpenseError> {
        let amount = self.form.parse_amount()?;
        let record = self
            .sync
            .add(
                &self.form.description,
                amount,
                &self.form.added_by,
                &self.form.participants,
            )
            .await?;

        self.form.clear();
        Ok(record)
    }

    /// Re-fetch the expense list.
    pub async fn refresh(&self) -> Result<ExpenseList, NetworkError> {
        self.sync.fetch_all().await
    }

    /// Schedule a local notification to check delivery end to end.
    pub async fn schedule_test_notification(&self) -> Result<String, PlatformError> {
        let notification = LocalNotification {
            title: self.config.push_title.clone(),
            body: "Test notification".to_string(),
            data: serde_json::json!({ "test": true }),
            trigger_after: Duration::from_secs(2),
        };
        let id = self.platform.schedule_local(&notification).await?;
        tracing::debug!(id = %id, "Test notification scheduled");
        Ok(id)
    }

    /// Close the event channel. Queued events can still be read, then
    /// `next_event` yields `None`.
    fn close_events(&mut self) {
        self.events_tx = None;
        self.events_rx.close();
    }

    /// Tear down: stop writing state and release both listeners.
    /// Returns how many subscriptions were released.
    pub fn unmount(&mut self) -> usize {
        if self.state == ControllerState::Unmounted {
            return 0;
        }
        self.mounted.set(false);
        let released = self.listeners.stop(&mut self.subscriptions);
        self.close_events();
        self.state = ControllerState::Unmounted;
        tracing::info!(released, "Controller unmounted");
        released
    }
}

impl Drop for AppController {
    fn drop(&mut self) {
        self.mounted.set(false);
        self.listeners.stop(&mut self.subscriptions);
        self.close_events();
    }
}

/// Log a push setup failure at the level its kind deserves.
fn report_registration_failure(error: &RegistrationError) {
    match error {
        RegistrationError::Token(TokenError::MissingProjectId) => {
            tracing::error!("Push notifications disabled: no project id configured");
        }
        RegistrationError::Token(TokenError::PermissionDenied) => {
            tracing::info!("Notification permission not granted, continuing without push");
        }
        RegistrationError::Token(TokenError::NotEligible) => {
            tracing::warn!("Push notifications need a physical device");
        }
        RegistrationError::Token(e @ TokenError::Platform(_)) => {
            tracing::warn!(error = %e, "Could not obtain push token");
        }
        RegistrationError::Register(e) => {
            tracing::warn!(error = %e, "Could not register push token");
        }
    }
}
