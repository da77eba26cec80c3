//! Core Bloom set implementation
//!
//! INVARIANTS:
//! - No false negatives: once `add(e)` succeeds, `contains(e)` is true until `clear()`.
//! - `k` and `m` are fixed at construction.
//! - `size()` counts `add` calls, not distinct elements.
//!
//! The set never enumerates or removes members. `iter()` and `remove()`
//! exist only to refuse with [`FilterError::Unsupported`].

use std::borrow::Borrow;
use std::convert::Infallible;
use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use super::bit_vector::{BitStorage, BitVector};
use super::config::BloomSetConfig;
use super::hash_functions::{BloomHash, BloomKey, IndexGenerator, Murmur3Hasher};
use super::parameters::{calculate_fpr, calculate_parameters};
use crate::error::{FilterError, UnsupportedOperation};

/// Probabilistic set of `E` backed by a Bloom filter
///
/// `contains` may report an element that was never added (with roughly the
/// configured probability) but never misses one that was.
///
/// Mutation takes `&mut self`; share across threads through
/// [`SharedBloomSet`](crate::SharedBloomSet) or another external lock.
pub struct BloomSet<E: ?Sized, S = BitVector, H = Murmur3Hasher> {
    bits: S,
    /// Number of hash rounds (k)
    k: usize,
    /// Size in bits (m)
    m: usize,
    /// Number of `add` calls since construction or the last `clear`
    n: usize,
    expected_insertions: usize,
    target_fpr: f64,
    indexer: IndexGenerator<H>,
    _element: PhantomData<fn(&E)>,
}

/// Member iterator that can never be constructed
///
/// Returned in the success position of [`BloomSet::iter`], which always fails.
pub struct Members<'a, E: ?Sized> {
    never: Infallible,
    _marker: PhantomData<&'a E>,
}

impl<'a, E: ?Sized> Iterator for Members<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        match self.never {}
    }
}

impl<E: BloomKey + ?Sized> BloomSet<E> {
    /// Create a set sized for `expected_insertions` at `false_positive_rate`
    ///
    /// Fails with [`FilterError::InvalidCapacity`] for zero insertions and
    /// [`FilterError::InvalidFPR`] for rates outside `(0, 1)`.
    pub fn new(expected_insertions: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        Self::with_config(&BloomSetConfig {
            expected_insertions,
            false_positive_rate,
        })
    }

    /// Create a set from a configuration
    pub fn with_config(config: &BloomSetConfig) -> Result<Self, FilterError> {
        Self::with_hasher(config, Murmur3Hasher::default())
    }
}

impl<E, S, H> BloomSet<E, S, H>
where
    E: BloomKey + ?Sized,
    S: BitStorage,
    H: BloomHash,
{
    /// Create a set with an explicit hash primitive and storage type
    pub fn with_hasher(config: &BloomSetConfig, hasher: H) -> Result<Self, FilterError> {
        let params = calculate_parameters(config.expected_insertions, config.false_positive_rate)?;

        debug!(
            expected_insertions = config.expected_insertions,
            target_fpr = config.false_positive_rate,
            hash_count = params.hash_count,
            size_bits = params.size_bits,
            "Bloom set allocated"
        );

        Ok(Self {
            bits: S::zeroed(params.size_bits),
            k: params.hash_count,
            m: params.size_bits,
            n: 0,
            expected_insertions: config.expected_insertions,
            target_fpr: config.false_positive_rate,
            indexer: IndexGenerator::new(hasher),
            _element: PhantomData,
        })
    }

    /// Add an element
    ///
    /// Only fails if the element cannot produce its canonical bytes; the set
    /// itself never rejects an insertion.
    pub fn add(&mut self, element: &E) -> Result<(), FilterError> {
        let positions = self.indexer.hash(element, self.k, self.m)?;
        self.bits.set_all(&positions)?;
        self.n += 1;
        Ok(())
    }

    /// Add every element in order
    ///
    /// Stops at the first encoding failure; elements before it stay added.
    pub fn add_all<I>(&mut self, elements: I) -> Result<(), FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        for element in elements {
            self.add(element.borrow())?;
        }
        Ok(())
    }

    /// Test if an element might be in the set
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be a false positive)
    /// - `false` if the element is definitely not in the set
    pub fn contains(&self, element: &E) -> Result<bool, FilterError> {
        let positions = self.indexer.hash(element, self.k, self.m)?;
        self.bits.test_all(&positions)
    }

    /// True iff every element might be in the set
    ///
    /// Each query carries its own false positive risk, so the chance of a
    /// wrong `true` grows with the number of elements checked.
    pub fn contains_all<I>(&self, elements: I) -> Result<bool, FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        for element in elements {
            if !self.contains(element.borrow())? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Always fails: a Bloom set cannot enumerate its members
    pub fn iter(&self) -> Result<Members<'_, E>, FilterError> {
        Err(FilterError::Unsupported(UnsupportedOperation::Iterate))
    }

    /// Always fails: clearing bits could create false negatives for other members
    pub fn remove(&mut self, _element: &E) -> Result<bool, FilterError> {
        Err(FilterError::Unsupported(UnsupportedOperation::Remove))
    }

    /// Number of `add` calls, an upper bound on distinct members
    pub fn size(&self) -> usize {
        self.n
    }

    /// True iff no bit is set, regardless of `size()`
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Reset all bits and the insertion counter
    pub fn clear(&mut self) {
        self.bits.clear();
        self.n = 0;
    }

    /// Physical footprint of the bit array in bits (word padding included)
    pub fn dimension(&self) -> usize {
        self.bits.physical_size()
    }

    /// Number of hash rounds (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Logical size of the bit array (m)
    pub fn size_bits(&self) -> usize {
        self.m
    }

    pub fn expected_insertions(&self) -> usize {
        self.expected_insertions
    }

    pub fn target_fpr(&self) -> f64 {
        self.target_fpr
    }

    /// Number of bits currently set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// Theoretical false positive rate at the current insertion count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn false_positive_rate(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }
}

impl<E: ?Sized, S: Clone, H: Clone> Clone for BloomSet<E, S, H> {
    fn clone(&self) -> Self {
        Self {
            bits: self.bits.clone(),
            k: self.k,
            m: self.m,
            n: self.n,
            expected_insertions: self.expected_insertions,
            target_fpr: self.target_fpr,
            indexer: self.indexer.clone(),
            _element: PhantomData,
        }
    }
}

impl<E: ?Sized, S, H> fmt::Debug for BloomSet<E, S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomSet")
            .field("k", &self.k)
            .field("m", &self.m)
            .field("n", &self.n)
            .field("expected_insertions", &self.expected_insertions)
            .field("target_fpr", &self.target_fpr)
            .finish_non_exhaustive()
    }
}
