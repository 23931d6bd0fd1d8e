// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client core: push token lifecycle and expense synchronization.

pub mod api;
pub mod controller;
pub mod expense_sync;
pub mod listeners;
pub mod permission;
pub mod push_token;
pub mod registrar;

pub use api::BackendClient;
pub use controller::{AppController, ControllerState, MountReport};
pub use expense_sync::{ExpenseSyncClient, MountFlag};
pub use listeners::{ListenerBridge, ListenerSubscriptions, PartialStart};
pub use permission::PermissionGate;
pub use push_token::TokenProvider;
pub use registrar::TokenRegistrar;
