//! False-positive sweep
//!
//! Builds one blocker per target rate over the same blocklist, counts how
//! many known-good domains each one wrongly blocks and records the filter
//! footprint. Results go to CSV:
//!
//! ```text
//! pf, errors, dim
//! 0.1, 12, 56.154296875
//! ```
//!
//! `pf` is a percentage, `dim` is in KiB.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::blocker::BloomBlocker;
use crate::error::{BlockerError, Result};

/// Bits per KiB
pub const BITS_PER_KB: f64 = 8.0 * 1024.0;

/// CSV header line
pub const CSV_HEADER: &str = "pf, errors, dim";

/// Outcome of one sweep step
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FprSample {
    /// Target false positive rate
    pub fpr: f64,
    /// Domains wrongly reported as blocked
    pub false_positives: usize,
    /// Filter footprint in KiB
    pub dimension_kb: f64,
}

impl FprSample {
    /// Observed false positive rate over `tested` domains
    pub fn observed_rate(&self, tested: usize) -> f64 {
        if tested == 0 {
            0.0
        } else {
            self.false_positives as f64 / tested as f64
        }
    }
}

/// `1e-6` through `1e-2` by decade, then `0.1` through `0.9` in tenths
pub fn default_sweep_rates() -> Vec<f64> {
    let decades = (2..=6).rev().map(|exp| 10f64.powi(-exp));
    let tenths = (1..=9).map(|t| f64::from(t) / 10.0);
    decades.chain(tenths).collect()
}

/// Run one blocker per rate and count false positives among `domains`.
///
/// `domains` is expected to hold only hostnames absent from `hosts`; every
/// positive is then a false positive.
pub fn sweep<H, D>(hosts: &[H], domains: &[D], rates: &[f64]) -> Result<Vec<FprSample>>
where
    H: AsRef<str>,
    D: AsRef<str>,
{
    let mut samples = Vec::with_capacity(rates.len());

    for &fpr in rates {
        let blocker = BloomBlocker::new(hosts, fpr)?;
        let false_positives = blocker.count_blocked(domains)?;
        let sample = FprSample {
            fpr,
            false_positives,
            dimension_kb: blocker.dimension() as f64 / BITS_PER_KB,
        };

        info!(
            fpr,
            false_positives,
            observed = sample.observed_rate(domains.len()),
            dimension_kb = sample.dimension_kb,
            "Sweep step finished"
        );
        samples.push(sample);
    }

    Ok(samples)
}

/// Target rate as a percentage, rounded to ten decimals with trailing zeros dropped
pub fn format_percent(fpr: f64) -> String {
    let fixed = format!("{:.10}", fpr * 100.0);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Write samples as CSV
pub fn write_csv<W: Write>(mut writer: W, samples: &[FprSample]) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for sample in samples {
        writeln!(
            writer,
            "{}, {}, {}",
            format_percent(sample.fpr),
            sample.false_positives,
            sample.dimension_kb
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write samples as CSV to `path`, replacing any existing file
pub fn write_csv_file(path: impl AsRef<Path>, samples: &[FprSample]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| BlockerError::io(path, e))?;
    write_csv(BufWriter::new(file), samples).map_err(|e| match e {
        BlockerError::Read(source) => BlockerError::io(path, source),
        other => other,
    })?;

    info!(path = %path.display(), rows = samples.len(), "Sweep written");
    Ok(())
}
