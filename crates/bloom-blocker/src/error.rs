//! Error types for the domain blocker

use std::io;
use std::path::PathBuf;

use bloom_set::FilterError;
use thiserror::Error;

/// Errors raised while loading blocklists, querying them or writing reports
#[derive(Debug, Error)]
pub enum BlockerError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Read error: {0}")]
    Read(#[from] io::Error),

    #[error("Blocklist contains no hostnames")]
    EmptyBlocklist,

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Telemetry initialization failed: {0}")]
    Telemetry(String),
}

impl BlockerError {
    /// Wrap an I/O failure with the path that caused it
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BlockerError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, BlockerError>;
