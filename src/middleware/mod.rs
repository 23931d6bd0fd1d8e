// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules.

pub mod request_counts;

pub use request_counts::{count_requests, RequestCounts};
