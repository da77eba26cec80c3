//! Counters for blocklist construction and domain lookups
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use bloom_blocker::metrics::Metrics;
//! use bloom_blocker::BloomBlocker;
//!
//! let metrics = Arc::new(Metrics::new());
//! let blocker = BloomBlocker::builder(&["ads.example.com"])
//!     .false_positive_rate(0.01)
//!     .metrics(metrics.clone())
//!     .build()?;
//!
//! blocker.check_domain("ads.example.com")?;
//! assert_eq!(metrics.snapshot().lookups_blocked, 1);
//! # Ok::<(), bloom_blocker::BlockerError>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

/// Thread-safe counters for one or more blockers
#[derive(Default)]
pub struct Metrics {
    /// Blocklists built
    pub blocklists_built: AtomicU64,
    /// Hostnames inserted across all blocklists
    pub hostnames_inserted: AtomicU64,
    /// Domain lookups performed
    pub lookups_performed: AtomicU64,
    /// Lookups that reported the domain as blocked
    pub lookups_blocked: AtomicU64,
    /// Bit storage allocated, in bytes
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative build time in nanoseconds
    pub build_time_ns: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished blocklist build
    ///
    /// # Arguments
    /// * `dimension_bits` - Storage footprint of the filter in bits
    /// * `hostnames` - Number of hostnames inserted
    /// * `duration` - Time taken to size the filter and insert every hostname
    pub fn record_blocklist_built(&self, dimension_bits: usize, hostnames: usize, duration: Duration) {
        self.blocklists_built.fetch_add(1, Ordering::Relaxed);
        self.hostnames_inserted
            .fetch_add(hostnames as u64, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add((dimension_bits / 8) as u64, Ordering::Relaxed);
        self.build_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record a domain lookup
    ///
    /// # Arguments
    /// * `duration` - Time taken for the lookup
    /// * `blocked` - Whether the domain was reported as blocked (possibly a false positive)
    pub fn record_lookup(&self, duration: Duration, blocked: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if blocked {
            self.lookups_blocked.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            blocklists_built: self.blocklists_built.load(Ordering::Relaxed),
            hostnames_inserted: self.hostnames_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_blocked: self.lookups_blocked.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            build_time_ns: self.build_time_ns.load(Ordering::Relaxed),
        }
    }

    /// Average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookup_time_ns.load(Ordering::Relaxed);
        let count = self.lookups_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Share of lookups reported as blocked
    ///
    /// Includes true and false positives alike.
    pub fn blocked_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let blocked = self.lookups_blocked.load(Ordering::Relaxed);
        if total > 0 {
            blocked as f64 / total as f64
        } else {
            0.0
        }
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub blocklists_built: u64,
    pub hostnames_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_blocked: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub build_time_ns: u64,
}

/// Sink for blocker instrumentation
///
/// Implement this to forward counts to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_blocklist_built(&self, dimension_bits: usize, hostnames: usize, duration: Duration);

    fn record_lookup(&self, duration: Duration, blocked: bool);
}

/// Recorder that discards everything
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_blocklist_built(&self, _: usize, _: usize, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_blocklist_built(&self, dimension_bits: usize, hostnames: usize, duration: Duration) {
        Metrics::record_blocklist_built(self, dimension_bits, hostnames, duration);
    }

    fn record_lookup(&self, duration: Duration, blocked: bool) {
        Metrics::record_lookup(self, duration, blocked);
    }
}
