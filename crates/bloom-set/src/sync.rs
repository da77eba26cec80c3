//! Lock-guarded Bloom set for use across threads
//!
//! `BloomSet` itself has no internal synchronization. `SharedBloomSet` puts
//! one `RwLock` around it: writers (`add`, `add_all`, `clear`) take the lock
//! exclusively, readers share it.

use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::{BloomKey, BloomSet, BloomSetConfig};
use crate::error::FilterError;

/// Cloneable, thread-safe handle to a single Bloom set
pub struct SharedBloomSet<E: ?Sized> {
    inner: Arc<RwLock<BloomSet<E>>>,
}

impl<E: BloomKey + ?Sized> SharedBloomSet<E> {
    pub fn new(expected_insertions: usize, false_positive_rate: f64) -> Result<Self, FilterError> {
        Ok(Self::from_set(BloomSet::new(
            expected_insertions,
            false_positive_rate,
        )?))
    }

    pub fn with_config(config: &BloomSetConfig) -> Result<Self, FilterError> {
        Ok(Self::from_set(BloomSet::with_config(config)?))
    }

    /// Wrap an existing set
    pub fn from_set(set: BloomSet<E>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(set)),
        }
    }

    pub fn add(&self, element: &E) -> Result<(), FilterError> {
        self.inner.write().add(element)
    }

    /// Add every element under a single write lock
    pub fn add_all<I>(&self, elements: I) -> Result<(), FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        self.inner.write().add_all(elements)
    }

    pub fn contains(&self, element: &E) -> Result<bool, FilterError> {
        self.inner.read().contains(element)
    }

    pub fn contains_all<I>(&self, elements: I) -> Result<bool, FilterError>
    where
        I: IntoIterator,
        I::Item: Borrow<E>,
    {
        self.inner.read().contains_all(elements)
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    pub fn size(&self) -> usize {
        self.inner.read().size()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.inner.read().dimension()
    }

    /// Run `f` with shared access to the underlying set
    pub fn with_read<R>(&self, f: impl FnOnce(&BloomSet<E>) -> R) -> R {
        f(&self.inner.read())
    }
}

impl<E: ?Sized> Clone for SharedBloomSet<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
