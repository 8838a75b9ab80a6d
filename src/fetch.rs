//! Upstream report download.
//!
//! The provider publishes one text file per station. The first non-empty
//! line is the observation timestamp, the second the raw report.

use std::time::Duration;

use tracing::debug;

use crate::config::UpstreamConfig;
use crate::error::{MetarError, Result};

/// Report text and the timestamp line published with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawObservation {
    pub reference: Option<String>,
    pub report: String,
}

impl RawObservation {
    /// Split a station file into timestamp and report lines
    pub fn from_body(body: &str) -> Self {
        let mut lines = body.lines().map(str::trim).filter(|line| !line.is_empty());
        let reference = lines.next().map(str::to_string);
        let report = lines.next().unwrap_or_default().to_string();
        Self { reference, report }
    }
}

/// HTTP client for the station report files
#[derive(Debug, Clone)]
pub struct MetarClient {
    client: reqwest::Client,
    base_url: String,
}

impl MetarClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MetarError::Config {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a station's report file
    pub fn station_url(&self, station: &str) -> String {
        format!("{}/{}.TXT", self.base_url, station.to_uppercase())
    }

    /// Download the latest report for a station
    pub async fn fetch(&self, station: &str) -> Result<RawObservation> {
        let url = self.station_url(station);
        debug!(station = station, url = %url, "Fetching report from upstream");

        let response = self.client.get(&url).send().await.map_err(|e| MetarError::RemoteApi {
            message: format!("Unable to reach remote weather server. reason: {}", e),
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(MetarError::StationNotFound {
                station: station.to_uppercase(),
            });
        }
        if !status.is_success() {
            return Err(MetarError::RemoteApi {
                message: format!(
                    "Remote weather server returned error. code: {}",
                    status.as_u16()
                ),
            });
        }

        let body = response.text().await.map_err(|e| MetarError::RemoteApi {
            message: format!("Unable to read remote weather server response. reason: {}", e),
        })?;

        Ok(RawObservation::from_body(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_station_file() {
        let body = "2024/01/15 19:51\nKJFK 151951Z 18010KT 10SM FEW250 24/18 A3000\n";
        let observation = RawObservation::from_body(body);
        assert_eq!(observation.reference.as_deref(), Some("2024/01/15 19:51"));
        assert_eq!(
            observation.report,
            "KJFK 151951Z 18010KT 10SM FEW250 24/18 A3000"
        );
    }

    #[test]
    fn test_split_skips_blank_lines() {
        let observation =
            RawObservation::from_body("\n  2024/01/15 19:51  \r\n\r\n KJFK 151951Z \n");
        assert_eq!(observation.reference.as_deref(), Some("2024/01/15 19:51"));
        assert_eq!(observation.report, "KJFK 151951Z");
    }

    #[test]
    fn test_split_missing_report_line() {
        let observation = RawObservation::from_body("2024/01/15 19:51\n");
        assert_eq!(observation.report, "");

        let observation = RawObservation::from_body("");
        assert_eq!(observation.reference, None);
    }

    #[test]
    fn test_station_url() {
        let client = MetarClient::new(&UpstreamConfig {
            base_url: "http://example.com/stations/".to_string(),
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            client.station_url("kjfk"),
            "http://example.com/stations/KJFK.TXT"
        );
    }
}
