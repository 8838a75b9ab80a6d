//! Heartbeat endpoint handler.
//!
//! Returns server status information, including uptime and cache statistics.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::CacheSnapshot;
use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Heartbeat response structure
#[derive(Serialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Upstream the reports are fetched from
    pub upstream: String,
    /// Cache counters, absent when caching is disabled
    pub cache: Option<CacheSnapshot>,
    /// Server status
    pub status: String,
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: state.uptime_seconds(),
        upstream: state.config.upstream.base_url.clone(),
        cache: state.service.cache().map(|cache| cache.snapshot()),
        status: "healthy".to_string(),
    })
}
