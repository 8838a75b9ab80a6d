//! Common test utilities for metar-info.
//!
//! This module provides shared utilities for testing the metar-info server.

pub mod fixtures;
pub mod http_client;
pub mod stub_upstream;
