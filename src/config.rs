//! Configuration management for metar-info.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{MetarError, Result};

/// Command-line arguments for metar-info
#[derive(Parser, Debug, Default)]
#[command(name = "metar-info")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "METAR_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "METAR_PORT")]
    pub port: Option<u16>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "METAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the station report files
    #[arg(long, env = "METAR_UPSTREAM_URL")]
    pub upstream_url: Option<String>,

    /// Seconds a decoded report stays cached
    #[arg(long, env = "METAR_CACHE_TTL")]
    pub cache_ttl: Option<u64>,

    /// Disable the report cache
    #[arg(long, env = "METAR_NO_CACHE")]
    pub no_cache: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "METAR_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream report provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Directory URL holding `<STATION>.TXT` files
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Decoded report cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Time-to-live of a cached report in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of cached stations
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments and environment
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(url) = args.upstream_url {
            config.upstream.base_url = url;
        }
        if let Some(ttl) = args.cache_ttl {
            config.cache.ttl_secs = ttl;
        }
        if args.no_cache {
            config.cache.enabled = false;
        }
        if let Some(level) = args.log_level {
            config.log_level = level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server = other.server;
        self.upstream = other.upstream;
        self.cache = other.cache;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        // Validate server host
        if self.server.host.is_empty() {
            return Err(MetarError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // Validate port (0 is not a valid port for users)
        if self.server.port == 0 {
            return Err(MetarError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        // Validate log level
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(MetarError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        let base_url = &self.upstream.base_url;
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(MetarError::Config {
                message: format!("Upstream URL must be http(s): {}", base_url),
            });
        }

        if self.upstream.timeout_secs == 0 {
            return Err(MetarError::Config {
                message: "Upstream timeout cannot be 0".to_string(),
            });
        }

        if self.cache.enabled && (self.cache.ttl_secs == 0 || self.cache.max_entries == 0) {
            return Err(MetarError::Config {
                message: "Cache TTL and capacity must be positive when caching is enabled"
                    .to_string(),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            cache: CacheConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_ttl_secs(),
            max_entries: default_max_entries(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://tgftp.nws.noaa.gov/data/observations/metar/stations/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    5 * 60
}

fn default_max_entries() -> usize {
    10_000
}

fn default_log_level() -> String {
    "info".to_string()
}
