// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - backend business logic.

pub mod expenses;
pub mod push;

pub use expenses::ExpenseService;
pub use push::PushService;
