//! Domain blocker over a Bloom set of hostnames
//!
//! A blocked domain is always reported as blocked. An allowed domain is
//! reported as blocked with probability close to the configured false
//! positive rate.

use std::fmt;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use bloom_set::BloomSet;
use tracing::{debug, info};

use crate::error::{BlockerError, Result};
use crate::hostfile::load_hostfile;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Default target false positive rate
pub const DEFAULT_FPR: f64 = 0.01;

/// Blocklist of hostnames
pub struct BloomBlocker {
    set: BloomSet<str>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl BloomBlocker {
    /// Build a blocker sized for exactly `hostnames.len()` entries.
    pub fn new<S: AsRef<str>>(hostnames: &[S], false_positive_rate: f64) -> Result<Self> {
        Self::builder(hostnames)
            .false_positive_rate(false_positive_rate)
            .build()
    }

    /// Build a blocker from a hosts file on disk
    pub fn from_hostfile(path: impl AsRef<Path>, false_positive_rate: f64) -> Result<Self> {
        let hostnames = load_hostfile(path)?;
        Self::new(&hostnames, false_positive_rate)
    }

    pub fn builder<S: AsRef<str>>(hostnames: &[S]) -> BloomBlockerBuilder<'_, S> {
        BloomBlockerBuilder {
            hostnames,
            false_positive_rate: DEFAULT_FPR,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Whether `domain` is (probably) on the blocklist
    pub fn check_domain(&self, domain: &str) -> Result<bool> {
        let start = Instant::now();
        let blocked = self.set.contains(domain)?;
        self.metrics.record_lookup(start.elapsed(), blocked);

        debug!(domain, blocked, "Domain checked");
        Ok(blocked)
    }

    /// Number of `domains` reported as blocked
    pub fn count_blocked<I>(&self, domains: I) -> Result<usize>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut blocked = 0;
        for domain in domains {
            if self.check_domain(domain.as_ref())? {
                blocked += 1;
            }
        }
        Ok(blocked)
    }

    /// Storage footprint of the underlying filter in bits
    pub fn dimension(&self) -> usize {
        self.set.dimension()
    }

    /// Number of hostnames inserted
    pub fn len(&self) -> usize {
        self.set.size()
    }

    pub fn is_empty(&self) -> bool {
        self.set.size() == 0
    }

    pub fn hash_count(&self) -> usize {
        self.set.hash_count()
    }

    pub fn target_fpr(&self) -> f64 {
        self.set.target_fpr()
    }

    pub fn metrics(&self) -> Arc<dyn MetricsRecorder> {
        Arc::clone(&self.metrics)
    }
}

impl fmt::Debug for BloomBlocker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomBlocker")
            .field("set", &self.set)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BloomBlocker`]
pub struct BloomBlockerBuilder<'a, S> {
    hostnames: &'a [S],
    false_positive_rate: f64,
    metrics: Arc<dyn MetricsRecorder>,
}

impl<S: AsRef<str>> BloomBlockerBuilder<'_, S> {
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = fpr;
        self
    }

    pub fn metrics(mut self, recorder: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = recorder;
        self
    }

    /// Size the filter for the hostnames and insert every one of them
    pub fn build(self) -> Result<BloomBlocker> {
        if self.hostnames.is_empty() {
            return Err(BlockerError::EmptyBlocklist);
        }

        let start = Instant::now();
        let mut set = BloomSet::<str>::new(self.hostnames.len(), self.false_positive_rate)?;
        for host in self.hostnames {
            set.add(host.as_ref())?;
        }
        self.metrics
            .record_blocklist_built(set.dimension(), set.size(), start.elapsed());

        info!(
            hostnames = set.size(),
            fpr = self.false_positive_rate,
            k = set.hash_count(),
            dimension_bits = set.dimension(),
            "Blocklist built"
        );

        Ok(BloomBlocker {
            set,
            metrics: self.metrics,
        })
    }
}
