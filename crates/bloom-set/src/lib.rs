//! # bloom-set
//!
//! Probabilistic set membership backed by a Bloom filter.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `BitVector`: word-packed bit storage behind the `BitStorage` trait
//!   - `parameters`: k and m from expected insertions and target FPR
//!   - `IndexGenerator`: Murmur3 x64-128 digest split into `h1 + i * h2` rounds
//!   - `BloomSet`: add / contains over the above
//!   - `BloomSetConfig`: validated sizing inputs
//!
//! - **Sync Layer** (`sync`): `SharedBloomSet`, one `RwLock` around a set
//!
//! ## Invariants
//!
//! - No false negatives: if added, `contains()` returns true until `clear()`
//! - `k = round(-log2(fpr))`, `m = ceil(n * -log2(fpr) / ln 2)`, both fixed at construction
//! - Iteration and removal always fail with `FilterError::Unsupported`
//!
//! ## Usage Example
//!
//! ```
//! use bloom_set::BloomSet;
//!
//! let mut set = BloomSet::<str>::new(3, 0.1)?;
//! set.add("a")?;
//! set.add("b")?;
//!
//! assert!(set.contains("a")?);
//! assert_eq!(set.size(), 2);
//! assert!(set.iter().is_err());
//! # Ok::<(), bloom_set::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod sync;

// Re-exports for convenience
pub use domain::{
    BitStorage, BitVector, BloomFilterParams, BloomHash, BloomKey, BloomSet, BloomSetConfig,
    BloomSetConfigBuilder, IndexGenerator, Members, Murmur3Hasher,
};
pub use error::{EncodingError, FilterError, UnsupportedOperation};
pub use sync::SharedBloomSet;
