//! Fixed-size bit storage
//!
//! INVARIANTS:
//! - Every index passed to set/test must lie in `[0, len)`.
//! - A rejected operation never mutates the storage; batch writes are
//!   validated in full before the first bit is touched.

use bitvec::prelude::*;

use crate::error::FilterError;

/// Capability interface for the bit array behind a Bloom set
pub trait BitStorage {
    /// Allocate storage of `len` logical bits, all cleared.
    fn zeroed(len: usize) -> Self
    where
        Self: Sized;

    /// Set a single bit.
    fn set(&mut self, index: usize) -> Result<(), FilterError>;

    /// Set every bit in `indices`, or none of them if any index is invalid.
    fn set_all(&mut self, indices: &[usize]) -> Result<(), FilterError>;

    /// Read a single bit.
    fn test(&self, index: usize) -> Result<bool, FilterError>;

    /// True iff every bit in `indices` is set. Stops at the first unset bit.
    fn test_all(&self, indices: &[usize]) -> Result<bool, FilterError>;

    /// Reset every bit to zero.
    fn clear(&mut self);

    /// Logical capacity in bits.
    fn len(&self) -> usize;

    /// Storage footprint in bits, including word padding.
    fn physical_size(&self) -> usize;

    /// True iff no bit is set.
    fn is_empty(&self) -> bool;

    /// Number of bits currently set.
    fn count_ones(&self) -> usize;
}

/// Word-packed bit vector backed by `u64` words
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    bits: BitVec<u64, Lsb0>,
}

impl BitVector {
    /// Create a bit vector of `len` bits, all cleared
    pub fn new(len: usize) -> Self {
        Self {
            bits: bitvec![u64, Lsb0; 0; len],
        }
    }

    /// Backing words, padding included
    pub fn as_raw_slice(&self) -> &[u64] {
        self.bits.as_raw_slice()
    }

    fn check_index(&self, index: usize) -> Result<(), FilterError> {
        if index >= self.bits.len() {
            return Err(FilterError::IndexOutOfRange {
                index,
                len: self.bits.len(),
            });
        }
        Ok(())
    }
}

impl BitStorage for BitVector {
    fn zeroed(len: usize) -> Self {
        Self::new(len)
    }

    fn set(&mut self, index: usize) -> Result<(), FilterError> {
        self.check_index(index)?;
        self.bits.set(index, true);
        Ok(())
    }

    fn set_all(&mut self, indices: &[usize]) -> Result<(), FilterError> {
        for &index in indices {
            self.check_index(index)?;
        }
        for &index in indices {
            self.bits.set(index, true);
        }
        Ok(())
    }

    fn test(&self, index: usize) -> Result<bool, FilterError> {
        self.check_index(index)?;
        Ok(self.bits[index])
    }

    fn test_all(&self, indices: &[usize]) -> Result<bool, FilterError> {
        for &index in indices {
            if !self.test(index)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn clear(&mut self) {
        self.bits.fill(false);
    }

    fn len(&self) -> usize {
        self.bits.len()
    }

    fn physical_size(&self) -> usize {
        self.bits.as_raw_slice().len() * u64::BITS as usize
    }

    fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }
}
