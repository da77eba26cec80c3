//! Domain Layer - Pure set logic
//!
//! This layer contains:
//! - Word-packed bit storage
//! - Parameter calculations (k, m, theoretical FPR)
//! - Murmur3 hashing and double-hashing index generation
//! - The Bloom set itself
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bit_vector;
pub mod bloom_set;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bit_vector::{BitStorage, BitVector};
pub use bloom_set::{BloomSet, Members};
pub use config::{BloomSetConfig, BloomSetConfigBuilder};
pub use hash_functions::{
    murmur3_x64_128, split_positions, BloomHash, BloomKey, IndexGenerator, Murmur3Hasher,
    DEFAULT_SEED,
};
pub use parameters::{
    calculate_fpr, calculate_parameters, compute_k, compute_m, validate_inputs, BloomFilterParams,
    MAX_FILTER_BITS,
};
