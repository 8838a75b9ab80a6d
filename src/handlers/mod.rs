//! HTTP request handlers for the metar-info API.
//!
//! Every endpoint answers with the same JSON envelope: `{"data": ...}` on
//! success, `{"error": {"message": ...}, "status": N}` on failure.

pub mod heartbeat;
pub mod info;
pub mod ping;

pub use heartbeat::heartbeat_handler;
pub use info::info_handler;
pub use ping::{ping_handler, root_handler};

use std::sync::Arc;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::error::MetarError;
use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/metar/ping", get(ping_handler))
        .route("/metar/info", get(info_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Successful response envelope
pub fn data_response<T: Serialize>(data: T) -> Response {
    Json(serde_json::json!({ "data": data })).into_response()
}

/// Error response envelope, with the status derived from the error kind
pub fn error_response(error: &MetarError) -> Response {
    let status = error.status_code();
    (
        status,
        Json(serde_json::json!({
            "error": { "message": error.to_string() },
            "status": status.as_u16(),
        })),
    )
        .into_response()
}
