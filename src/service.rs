//! Read-through weather lookup: cache, then upstream fetch and decode.

use std::time::Duration;

use tracing::{debug, info};

use crate::cache::ReportCache;
use crate::config::Config;
use crate::decoder;
use crate::error::{MetarError, Result};
use crate::fetch::MetarClient;
use crate::logging::log_timed_operation;
use crate::render::RenderedReport;

/// Station lookups backed by the upstream provider and an optional cache
pub struct WeatherService {
    client: MetarClient,
    cache: Option<ReportCache>,
}

impl WeatherService {
    pub fn new(config: &Config) -> Result<Self> {
        let cache = config.cache.enabled.then(|| {
            ReportCache::new(
                config.cache.max_entries,
                Duration::from_secs(config.cache.ttl_secs),
            )
        });

        Ok(Self {
            client: MetarClient::new(&config.upstream)?,
            cache,
        })
    }

    pub fn cache(&self) -> Option<&ReportCache> {
        self.cache.as_ref()
    }

    /// Rendered report for a station.
    ///
    /// With `nocache` set (or caching disabled) the upstream is always
    /// queried; a fresh report is still stored for later readers.
    pub async fn get_weather(&self, station: &str, nocache: bool) -> Result<RenderedReport> {
        if station.is_empty() || !station.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MetarError::StationNotFound {
                station: station.to_string(),
            });
        }

        if !nocache {
            if let Some(report) = self.cache.as_ref().and_then(|cache| cache.get(station)) {
                debug!(station = station, "Serving report from cache");
                return Ok(report);
            }
        }

        let report = self.fetch_fresh(station).await?;

        if let Some(cache) = &self.cache {
            // keyed by the decoded identifier, not the requested one
            let key = report.station().unwrap_or(station).to_string();
            cache.put(&key, report.clone());
        }

        Ok(report)
    }

    async fn fetch_fresh(&self, station: &str) -> Result<RenderedReport> {
        let observation = self.client.fetch(station).await?;
        let report = log_timed_operation("decode_metar", || {
            decoder::decode(&observation.report, observation.reference.as_deref())
        })?;

        info!(
            station = station,
            fields = report.len(),
            "Decoded fresh report"
        );
        Ok(report)
    }
}
