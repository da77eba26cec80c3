//! Blocker configuration from environment variables

use std::env;
use std::path::PathBuf;

use crate::blocker::DEFAULT_FPR;
use crate::error::{BlockerError, Result};

/// Runtime settings for the blocker binary
#[derive(Debug, Clone, PartialEq)]
pub struct BlockerConfig {
    /// Hosts file holding the blocklist
    pub hosts_file: PathBuf,

    /// Target false positive rate
    pub false_positive_rate: f64,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,
}

impl Default for BlockerConfig {
    fn default() -> Self {
        Self {
            hosts_file: PathBuf::from("hosts"),
            false_positive_rate: DEFAULT_FPR,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl BlockerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_HOSTS_FILE`: Blocklist path (default: hosts)
    /// - `BLOOM_FPR`: Target false positive rate (default: 0.01)
    /// - `BLOOM_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `BLOOM_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// Only parse errors fail here. Range checks happen in
    /// [`validate`](Self::validate), after any command-line overrides.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let false_positive_rate = match lookup("BLOOM_FPR") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| BlockerError::Config(format!("BLOOM_FPR is not a number: {raw:?}")))?,
            None => defaults.false_positive_rate,
        };

        let config = Self {
            hosts_file: lookup("BLOOM_HOSTS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.hosts_file),

            false_positive_rate,

            log_level: lookup("BLOOM_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or(defaults.log_level),

            json_logs: lookup("BLOOM_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(defaults.json_logs),
        };
        Ok(config)
    }

    /// Check the false positive rate lies strictly between 0 and 1
    pub fn validate(&self) -> Result<()> {
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(BlockerError::Config(format!(
                "false positive rate must be strictly between 0 and 1, got {}",
                self.false_positive_rate
            )));
        }
        Ok(())
    }
}
