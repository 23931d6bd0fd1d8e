// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models shared by the client core and the backend.

pub mod expense;
pub mod notification;
pub mod token;

pub use expense::{ExpenseForm, ExpenseList, ExpenseRecord, NewExpense};
pub use notification::{
    ChannelImportance, DeviceOs, ForegroundPresentation, LocalNotification, Notification,
    NotificationChannel, NotificationEvent, NotificationResponse, PermissionState, PushMessage,
};
pub use token::{PushToken, RegisterTokenRequest, RegisterTokenResponse, TokenList};
