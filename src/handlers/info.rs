//! Station report endpoint handler.
//!
//! Returns the decoded, human-readable report for one station.

use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::{data_response, error_response};
use crate::error::MetarError;
use crate::logging::{generate_request_id, log_request_error};
use crate::state::AppState;

/// Query parameters for the info endpoint
#[derive(Debug, Deserialize)]
pub struct InfoQuery {
    /// Station code, e.g. `KJFK`
    pub scode: Option<String>,
    /// `1` bypasses the cache
    pub nocache: Option<String>,
}

impl InfoQuery {
    fn bypass_cache(&self) -> bool {
        matches!(self.nocache.as_deref(), Some("1") | Some("true"))
    }
}

/// Handle GET /metar/info requests
pub async fn info_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<InfoQuery>,
) -> Response {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/metar/info",
        request_id = %request_id,
        scode = ?params.scode,
        nocache = ?params.nocache,
        "Processing station report request"
    );

    let Some(station) = params.scode.as_deref().filter(|s| !s.is_empty()) else {
        let error = MetarError::MissingParameter {
            param: "scode".to_string(),
        };
        log_request_error(&error, "/metar/info", &request_id, None);
        return error_response(&error);
    };

    match state.service.get_weather(station, params.bypass_cache()).await {
        Ok(report) => {
            info!(
                endpoint = "/metar/info",
                request_id = %request_id,
                station = station,
                duration_us = start_time.elapsed().as_micros() as u64,
                "Station report request successful"
            );
            data_response(report)
        }
        Err(error) => {
            log_request_error(
                &error,
                "/metar/info",
                &request_id,
                Some(&format!("scode={}", station)),
            );
            error_response(&error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::handlers::router;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let mut config = Config::default();
        config.upstream.base_url = "http://127.0.0.1:9/".to_string();
        AppState::new_shared(config).unwrap()
    }

    async fn get(path: &str) -> (StatusCode, serde_json::Value) {
        let response = router(test_state())
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_nocache_flag() {
        let query = InfoQuery {
            scode: Some("KJFK".to_string()),
            nocache: Some("1".to_string()),
        };
        assert!(query.bypass_cache());

        let query = InfoQuery {
            scode: None,
            nocache: Some("0".to_string()),
        };
        assert!(!query.bypass_cache());
    }

    #[tokio::test]
    async fn test_missing_station_code() {
        let (status, body) = get("/metar/info").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], 404);
        assert_eq!(body["error"]["message"], "query param scode is missing");
    }

    #[tokio::test]
    async fn test_unreachable_upstream() {
        let (status, body) = get("/metar/info?scode=KJFK").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Unable to reach remote weather server"));
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = get("/metar/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "pong");
    }
}
