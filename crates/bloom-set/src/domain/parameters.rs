//! Bloom set parameter calculation
//!
//! Formulas:
//! - k = round(-log2(fpr))             -- hash rounds per element
//! - m = ceil(n * -log2(fpr) / ln(2))  -- bits in the array
//! - FPR = (1 - e^(-kn/m))^k           -- theoretical false positive rate
//!
//! `n * log2(1/fpr) / ln(2)` is the same quantity as `-n * ln(fpr) / ln(2)^2`;
//! the log2 form is kept so results match existing reference vectors bit for bit.

use std::f64::consts::LN_2;

use crate::error::FilterError;

/// Largest supported bit-array length. Indices are derived from 32-bit
/// signed arithmetic, so positions past this bound are unreachable.
pub const MAX_FILTER_BITS: usize = i32::MAX as usize;

/// Parameters derived for a Bloom set
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter (m)
    pub size_bits: usize,
    /// Number of hash rounds (k)
    pub hash_count: usize,
    /// Theoretical false positive rate once `n` elements are inserted
    pub expected_fpr: f64,
}

fn log2(x: f64) -> f64 {
    x.ln() / LN_2
}

/// Number of hash rounds for a target false positive rate.
///
/// Callers must ensure `0 < fpr < 1`. The result is clamped to at least 1,
/// since rates above `2^-0.5` would otherwise round to zero rounds.
pub fn compute_k(fpr: f64) -> usize {
    let k = (-log2(fpr)).round() as usize;
    k.max(1)
}

/// Number of bits for `n` expected insertions at a target false positive rate.
///
/// Callers must ensure `n > 0` and `0 < fpr < 1`.
pub fn compute_m(n: usize, fpr: f64) -> usize {
    ((n as f64 * -log2(fpr)) / LN_2).ceil() as usize
}

/// Reject construction inputs outside the supported domain
pub fn validate_inputs(n: usize, fpr: f64) -> Result<(), FilterError> {
    if n == 0 {
        return Err(FilterError::InvalidCapacity { count: n });
    }
    // Written so that NaN fails the check as well
    if !(fpr > 0.0 && fpr < 1.0) {
        return Err(FilterError::InvalidFPR { fpr });
    }
    Ok(())
}

/// Validate inputs and derive (k, m) for a Bloom set
///
/// # Arguments
/// * `num_elements` - Expected number of insertions (n)
/// * `target_fpr` - Target false positive rate in (0, 1)
pub fn calculate_parameters(
    num_elements: usize,
    target_fpr: f64,
) -> Result<BloomFilterParams, FilterError> {
    validate_inputs(num_elements, target_fpr)?;

    let hash_count = compute_k(target_fpr);
    let size_bits = compute_m(num_elements, target_fpr);

    if size_bits > MAX_FILTER_BITS {
        return Err(FilterError::FilterTooLarge {
            size: size_bits,
            max: MAX_FILTER_BITS,
        });
    }

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: calculate_fpr(size_bits, num_elements, hash_count),
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
