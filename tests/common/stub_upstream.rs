//! In-process stand-in for the station report provider.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::fixtures;

/// Station files and a request counter
pub struct StubUpstream {
    files: HashMap<String, String>,
    requests: AtomicUsize,
}

impl StubUpstream {
    /// Number of requests the stub has answered
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

async fn station_file(
    State(stub): State<Arc<StubUpstream>>,
    Path(file): Path<String>,
) -> (StatusCode, String) {
    stub.requests.fetch_add(1, Ordering::SeqCst);

    if file == "FAIL.TXT" {
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }
    match stub.files.get(&file) {
        Some(body) => (StatusCode::OK, body.clone()),
        None => (StatusCode::NOT_FOUND, String::new()),
    }
}

/// Serve the fixture station files on an ephemeral port
pub async fn start() -> (SocketAddr, Arc<StubUpstream>) {
    let stub = Arc::new(StubUpstream {
        files: fixtures::station_files()
            .into_iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect(),
        requests: AtomicUsize::new(0),
    });

    let app = Router::new()
        .route("/stations/:file", get(station_file))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub upstream");
    let addr = listener.local_addr().expect("Stub upstream has no address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Stub upstream error");
    });

    (addr, stub)
}
