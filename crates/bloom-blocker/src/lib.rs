//! # bloom-blocker
//!
//! Domain blocklist built on [`bloom_set::BloomSet`].
//!
//! ## Modules
//!
//! - `hostfile`: `0.0.0.0 <host>` blocklists and IP-prefixed domain lists
//! - `blocker`: `BloomBlocker`, sized from the blocklist and a target FPR
//! - `report`: false-positive sweep across rates, CSV output
//! - `metrics`: lookup and build counters
//! - `config` / `telemetry`: environment configuration and tracing setup
//!
//! ## Usage Example
//!
//! ```
//! use std::io::Cursor;
//! use bloom_blocker::{read_hostfile, BloomBlocker};
//!
//! let hosts = read_hostfile(Cursor::new("0.0.0.0 ads.example.com\n"))?;
//! let blocker = BloomBlocker::new(&hosts, 0.001)?;
//!
//! assert!(blocker.check_domain("ads.example.com")?);
//! # Ok::<(), bloom_blocker::BlockerError>(())
//! ```

pub mod blocker;
pub mod config;
pub mod error;
pub mod hostfile;
pub mod metrics;
pub mod report;
pub mod telemetry;

// Re-exports for convenience
pub use blocker::{BloomBlocker, BloomBlockerBuilder, DEFAULT_FPR};
pub use config::BlockerConfig;
pub use error::{BlockerError, Result};
pub use hostfile::{
    load_domain_list, load_hostfile, parse_hosts_line, parse_ip_prefixed_line, read_domain_list,
    read_hostfile,
};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use report::{default_sweep_rates, sweep, write_csv, write_csv_file, FprSample};
