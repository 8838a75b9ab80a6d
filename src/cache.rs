//! In-memory cache of rendered reports keyed by station identifier.
//!
//! ## Eviction Strategy
//! - LRU eviction once `max_entries` stations are cached
//! - TTL-based expiration on read (lazy)

use lru::LruCache;
use parking_lot::Mutex;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::render::RenderedReport;

/// Cached report entry.
struct CachedReport {
    report: RenderedReport,
    inserted_at: Instant,
    ttl: Duration,
}

impl CachedReport {
    fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() >= self.ttl
    }
}

/// Counters for the report cache.
#[derive(Default)]
pub struct CacheStats {
    /// Total cache hits.
    pub hits: AtomicU64,
    /// Total cache misses.
    pub misses: AtomicU64,
    /// Total entries evicted to make room.
    pub evictions: AtomicU64,
    /// Total entries expired via TTL.
    pub expired: AtomicU64,
}

/// Point-in-time copy of the cache counters
#[derive(Debug, Clone, Serialize)]
pub struct CacheSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expired: u64,
    pub entries: usize,
    pub hit_rate: f64,
}

impl CacheStats {
    /// Calculate cache hit rate as a percentage (0-100).
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            (hits as f64 / total as f64) * 100.0
        }
    }
}

/// LRU cache of rendered reports with a fixed time-to-live
pub struct ReportCache {
    cache: Mutex<LruCache<String, CachedReport>>,
    ttl: Duration,
    stats: CacheStats,
}

impl ReportCache {
    /// Create a new report cache. A capacity of zero is raised to one.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);

        tracing::info!(
            "ReportCache initialized: max_entries={}, ttl_secs={}",
            capacity,
            ttl.as_secs()
        );

        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl,
            stats: CacheStats::default(),
        }
    }

    fn key(station: &str) -> String {
        station.to_uppercase()
    }

    /// Get a live report for a station.
    pub fn get(&self, station: &str) -> Option<RenderedReport> {
        let key = Self::key(station);
        let mut cache = self.cache.lock();

        match cache.get(&key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                return Some(entry.report.clone());
            }
            Some(_) => {
                self.stats.expired.fetch_add(1, Ordering::Relaxed);
            }
            None => {}
        }

        cache.pop(&key);
        self.stats.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Store a report under a station identifier.
    pub fn put(&self, station: &str, report: RenderedReport) {
        let key = Self::key(station);
        let entry = CachedReport {
            report,
            inserted_at: Instant::now(),
            ttl: self.ttl,
        };

        let mut cache = self.cache.lock();
        if let Some((evicted, _)) = cache.push(key.clone(), entry) {
            if evicted != key {
                self.stats.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("ReportCache evicted station {}", evicted);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache statistics.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            evictions: self.stats.evictions.load(Ordering::Relaxed),
            expired: self.stats.expired.load(Ordering::Relaxed),
            entries: self.len(),
            hit_rate: self.stats.hit_rate(),
        }
    }
}
