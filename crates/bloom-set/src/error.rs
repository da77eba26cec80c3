//! Error types for the Bloom set

use std::fmt;

use thiserror::Error;

/// Errors that can occur while building or querying a Bloom set
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid expected insertions: {count} (must be greater than 0)")]
    InvalidCapacity { count: usize },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFPR { fpr: f64 },

    #[error("Bit index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Filter size exceeds maximum: {size} > {max}")]
    FilterTooLarge { size: usize, max: usize },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(UnsupportedOperation),

    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

impl FilterError {
    /// Whether this error belongs to the invalid-argument family
    /// (bad construction inputs or out-of-range bit indices).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            FilterError::InvalidCapacity { .. }
                | FilterError::InvalidFPR { .. }
                | FilterError::IndexOutOfRange { .. }
                | FilterError::FilterTooLarge { .. }
                | FilterError::InvalidParameters(_)
        )
    }

    /// Whether this error is a permanent refusal of an operation the
    /// structure cannot provide.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, FilterError::Unsupported(_))
    }
}

/// Operations a Bloom set refuses outright
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnsupportedOperation {
    /// Enumerating stored members
    Iterate,
    /// Removing a member (would risk false negatives for others)
    Remove,
}

impl fmt::Display for UnsupportedOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedOperation::Iterate => f.write_str("the set does not support iteration"),
            UnsupportedOperation::Remove => f.write_str("the set does not support removal"),
        }
    }
}

/// An element could not be converted to its canonical byte form
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EncodingError {
    message: String,
}

impl EncodingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
