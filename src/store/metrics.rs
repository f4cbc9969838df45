//! Dictionary cache and fetch metrics.
//!
//! Instance-scoped: each `TranslationStore` owns its own counters, so state
//! lives and dies with the store rather than in process-wide globals.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for dictionary cache and fetch activity.
#[derive(Debug, Default)]
pub struct DictionaryMetrics {
    /// Number of loads answered from the in-memory cache
    cache_hits: AtomicUsize,

    /// Number of loads that had to go to the network (or join an in-flight fetch)
    cache_misses: AtomicUsize,

    /// Number of fetch attempts issued (retries count individually)
    fetches: AtomicUsize,

    /// Number of fetch attempts that failed
    fetch_failures: AtomicUsize,
}

impl DictionaryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch(&self) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cache_hits(&self) -> usize {
        self.cache_hits.load(Ordering::Relaxed)
    }

    pub fn cache_misses(&self) -> usize {
        self.cache_misses.load(Ordering::Relaxed)
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn fetch_failures(&self) -> usize {
        self.fetch_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits();
        let misses = self.cache_misses();
        let total_lookups = hits + misses;
        let cache_hit_rate = if total_lookups > 0 {
            (hits as f64 / total_lookups as f64) * 100.0
        } else {
            0.0
        };

        let fetches = self.fetches();
        let failures = self.fetch_failures();
        let fetch_success_rate = if fetches > 0 {
            ((fetches - failures) as f64 / fetches as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            fetches,
            fetch_failures: failures,
            fetch_success_rate,
        }
    }
}

/// Snapshot of dictionary metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,
    /// Cache hit rate as a percentage (0-100)
    pub cache_hit_rate: f64,
    pub fetches: usize,
    pub fetch_failures: usize,
    /// Fetch success rate as a percentage (0-100)
    pub fetch_success_rate: f64,
}
