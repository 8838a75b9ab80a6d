//! Application state management for metar-info.
//!
//! This module defines the shared state that is passed to all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::Result;
use crate::service::WeatherService;

/// The main application state shared across all handlers
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Station lookups
    pub service: WeatherService,
    /// When the server state was built
    pub started_at: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(config: Config) -> Result<Self> {
        let service = WeatherService::new(&config)?;
        Ok(Self {
            config,
            service,
            started_at: Instant::now(),
        })
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config) -> Result<Arc<Self>> {
        Ok(Arc::new(Self::new(config)?))
    }

    /// Seconds since the state was created
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_follows_cache_config() {
        let state = AppState::new(Config::default()).unwrap();
        assert!(state.service.cache().is_some());

        let mut config = Config::default();
        config.cache.enabled = false;
        let state = AppState::new_shared(config).unwrap();
        assert!(state.service.cache().is_none());
        assert!(state.uptime_seconds() < 5);
    }
}
