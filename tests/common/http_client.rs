//! HTTP client utilities for testing.
//!
//! This module provides helper functions for making HTTP requests to the
//! metar-info server during tests.

use reqwest::{Client, Url};
use serde_json::Value;
use std::error::Error;
use std::net::SocketAddr;
use std::time::Duration;

/// Default timeout for HTTP requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Create a default test client
pub fn create_test_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("Failed to build test HTTP client")
}

/// Build a URL for a metar-info server endpoint
pub fn build_url(addr: &SocketAddr, path: &str) -> Url {
    format!("http://{}{}", addr, path)
        .parse()
        .expect("Failed to parse URL")
}

/// Make a GET request and return the status code with the JSON body
pub async fn get_json(addr: &SocketAddr, path: &str) -> Result<(u16, Value), Box<dyn Error>> {
    let client = create_test_client();
    let url = build_url(addr, path);
    println!("Making request to: {}", url);

    let response = client.get(url).send().await?;
    let status = response.status().as_u16();
    Ok((status, response.json::<Value>().await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let addr: SocketAddr = ([127, 0, 0, 1], 8000).into();
        let url = build_url(&addr, "/metar/info?scode=KJFK");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/metar/info?scode=KJFK");
    }
}
