// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-route request counter middleware.

use crate::AppState;
use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Request counts keyed by `"METHOD /route"`.
#[derive(Clone, Default)]
pub struct RequestCounts(Arc<DashMap<String, u64>>);

impl RequestCounts {
    pub fn record(&self, method: &str, route: &str) {
        *self.0.entry(format!("{} {}", method, route)).or_insert(0) += 1;
    }

    pub fn get(&self, method: &str, route: &str) -> u64 {
        self.0
            .get(&format!("{} {}", method, route))
            .map(|count| *count)
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.0
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}

/// Count every request that matched a route.
pub async fn count_requests(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    // Keyed by route template so unknown paths cannot grow the map.
    if let Some(route) = req.extensions().get::<MatchedPath>() {
        state.request_counts.record(req.method().as_str(), route.as_str());
    }
    next.run(req).await
}
