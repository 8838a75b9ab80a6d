//! Liveness endpoints.

use axum::response::Response;

use super::data_response;

/// Handle GET / requests
pub async fn root_handler() -> Response {
    data_response("Get metar data in human friendly format.")
}

/// Handle GET /metar/ping requests
pub async fn ping_handler() -> Response {
    data_response("pong")
}
