//! Hash functions and index generation for the Bloom set
//!
//! One Murmur3 x64-128 digest (seed 0) per element feeds the
//! "Same Performance, Less Hashing" scheme:
//!
//! ```text
//! g_i(x) = h1(x) + i * h2(x)    for i in 1..=k
//! ```
//!
//! where `h1`/`h2` are the low/high 32-bit halves of the digest's low 64
//! bits, read as signed integers. Negative `g_i` are folded with a bitwise
//! complement (not `abs`) before reducing modulo `m`; this keeps the
//! positions identical to existing reference vectors.

use std::borrow::Cow;
use std::io::Cursor;

use crate::error::{EncodingError, FilterError};

/// Seed used by the default hash primitive
pub const DEFAULT_SEED: u32 = 0;

/// Canonical byte form of an element
///
/// Two elements that should be considered equal by the set must produce
/// identical bytes. Text is hashed as its UTF-8 bytes; fixed-width integers
/// as little-endian bytes.
pub trait BloomKey {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError>;
}

impl BloomKey for str {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BloomKey for String {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl BloomKey for [u8] {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self))
    }
}

impl BloomKey for Vec<u8> {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl<const N: usize> BloomKey for [u8; N] {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

impl BloomKey for char {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        let mut buf = [0u8; 4];
        Ok(Cow::Owned(self.encode_utf8(&mut buf).as_bytes().to_vec()))
    }
}

impl BloomKey for bool {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Owned(vec![u8::from(*self)]))
    }
}

impl<T: BloomKey + ?Sized> BloomKey for &T {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        (**self).canonical_bytes()
    }
}

macro_rules! impl_bloom_key_for_int {
    ($($ty:ty),*) => {
        $(
            impl BloomKey for $ty {
                fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
                    Ok(Cow::Owned(self.to_le_bytes().to_vec()))
                }
            }
        )*
    };
}

impl_bloom_key_for_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

// Pointer-sized integers hash as 64-bit so results do not depend on the target.
impl BloomKey for usize {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Owned((*self as u64).to_le_bytes().to_vec()))
    }
}

impl BloomKey for isize {
    fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
        Ok(Cow::Owned((*self as i64).to_le_bytes().to_vec()))
    }
}

/// Hash primitive feeding the index generator
///
/// Implementations must be pure: the same bytes always give the same value.
pub trait BloomHash {
    /// 64-bit digest of `bytes`
    fn hash64(&self, bytes: &[u8]) -> u64;
}

/// Full 128-bit Murmur3 x64 digest
pub fn murmur3_x64_128(element: &[u8], seed: u32) -> u128 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory slice cannot fail
    murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0)
}

/// Murmur3 x64-128 with a fixed seed, reduced to its low 64 bits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Murmur3Hasher {
    seed: u32,
}

impl Murmur3Hasher {
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Murmur3Hasher {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl BloomHash for Murmur3Hasher {
    fn hash64(&self, bytes: &[u8]) -> u64 {
        murmur3_x64_128(bytes, self.seed) as u64
    }
}

/// Derive `k` positions in `[0, m)` from one 64-bit digest
///
/// Requires `m >= 1`. Duplicate positions are kept.
pub fn split_positions(hash64: u64, k: usize, m: usize) -> Vec<usize> {
    let h1 = hash64 as u32 as i32;
    let h2 = (hash64 >> 32) as u32 as i32;

    (1..=k)
        .map(|i| {
            let mut g = h1.wrapping_add((i as i32).wrapping_mul(h2));
            if g < 0 {
                g = !g;
            }
            g as usize % m
        })
        .collect()
}

/// Maps elements to the bit positions they occupy
#[derive(Clone, Copy, Debug, Default)]
pub struct IndexGenerator<H = Murmur3Hasher> {
    hasher: H,
}

impl<H: BloomHash> IndexGenerator<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Compute the `k` positions of `element` in a filter of `m` bits
    pub fn hash<E: BloomKey + ?Sized>(
        &self,
        element: &E,
        k: usize,
        m: usize,
    ) -> Result<Vec<usize>, FilterError> {
        let bytes = element.canonical_bytes()?;
        self.hash_bytes(&bytes, k, m)
    }

    /// Compute the `k` positions of already-encoded bytes
    pub fn hash_bytes(&self, bytes: &[u8], k: usize, m: usize) -> Result<Vec<usize>, FilterError> {
        if k == 0 || m == 0 {
            return Err(FilterError::InvalidParameters(format!(
                "index generation requires k >= 1 and m >= 1 (got k={}, m={})",
                k, m
            )));
        }
        Ok(split_positions(self.hasher.hash64(bytes), k, m))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    fn murmur3_generator() -> IndexGenerator {
        IndexGenerator::default()
    }

    #[test]
    fn test_murmur3_reference_digests() {
        assert_eq!(murmur3_x64_128(b"", 0), 0);

        let digest = murmur3_x64_128(FOX.as_bytes(), 0);
        assert_eq!(digest as u64, 0xe34b_bc7b_bc07_1b6c);
        assert_eq!((digest >> 64) as u64, 0x7a43_3ca9_c49a_9347);

        let digest = murmur3_x64_128(b"hell", 0);
        assert_eq!(digest as u64, 0x6299_4269_3e10_f867);
    }

    #[test]
    fn test_default_hasher_uses_seed_zero() {
        let hasher = Murmur3Hasher::default();
        assert_eq!(hasher.seed(), 0);
        assert_eq!(hasher.hash64(FOX.as_bytes()), 0xe34b_bc7b_bc07_1b6c);
    }

    #[test]
    fn test_different_seed_different_output() {
        let h0 = Murmur3Hasher::with_seed(0).hash64(b"test_address_0xABCD");
        let h1 = Murmur3Hasher::with_seed(1).hash64(b"test_address_0xABCD");
        assert_ne!(h0, h1, "Different seeds must produce different outputs");
    }

    #[test]
    fn test_reference_index_vectors() {
        let generator = murmur3_generator();

        assert_eq!(generator.hash("a", 3, 15).unwrap(), vec![5, 3, 13]);
        assert_eq!(generator.hash("b", 3, 15).unwrap(), vec![14, 11, 8]);
        assert_eq!(generator.hash("c", 3, 15).unwrap(), vec![10, 8, 3]);
        assert_eq!(
            generator.hash("a", 7, 1000).unwrap(),
            vec![550, 403, 743, 405, 741, 407, 739]
        );
        assert_eq!(
            generator.hash("example.com", 7, 1000).unwrap(),
            vec![38, 753, 545, 958, 833, 625, 878]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        // The fox digest collides on rounds 2 and 3 for m = 15
        let positions = murmur3_generator().hash(FOX, 3, 15).unwrap();
        assert_eq!(positions, vec![3, 6, 6]);
    }

    #[test]
    fn test_negative_rounds_fold_with_complement() {
        // h1 = -1, h2 = 0: g = -1 folds to !(-1) = 0, where abs() would give 1
        let hash64 = 0x0000_0000_ffff_ffffu64;
        assert_eq!(split_positions(hash64, 2, 10), vec![0, 0]);

        // h1 = i32::MIN, h2 = 0: complement gives i32::MAX, abs() would overflow
        let hash64 = 0x0000_0000_8000_0000u64;
        assert_eq!(split_positions(hash64, 1, 1 << 31), vec![i32::MAX as usize]);
    }

    #[test]
    fn test_rounds_wrap_in_32_bits() {
        // h1 = i32::MAX, h2 = 1: round 1 wraps to i32::MIN, folds to i32::MAX
        let hash64 = (1u64 << 32) | 0x7fff_ffff;
        assert_eq!(split_positions(hash64, 1, 1 << 31), vec![i32::MAX as usize]);
    }

    #[test]
    fn test_positions_in_range_and_deterministic() {
        let generator = murmur3_generator();
        let k = 7;
        let m = 10_000;

        let first = generator.hash("test_address_0xABCD", k, m).unwrap();
        let second = generator.hash("test_address_0xABCD", k, m).unwrap();

        assert_eq!(first.len(), k, "Should produce k positions");
        assert_eq!(first, second, "Same input must give the same positions");
        assert!(first.iter().all(|&pos| pos < m));
    }

    #[test]
    fn test_text_hashes_as_utf8() {
        let generator = murmur3_generator();
        let from_str = generator.hash("dominio-è.it", 5, 997).unwrap();
        let from_bytes = generator.hash("dominio-è.it".as_bytes(), 5, 997).unwrap();
        let from_string = generator.hash(&String::from("dominio-è.it"), 5, 997).unwrap();

        assert_eq!(from_str, from_bytes);
        assert_eq!(from_str, from_string);
    }

    #[test]
    fn test_zero_k_or_m_rejected() {
        let generator = murmur3_generator();

        assert!(matches!(
            generator.hash("x", 0, 10),
            Err(FilterError::InvalidParameters(_))
        ));
        assert!(matches!(
            generator.hash("x", 3, 0),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_encoding_error_propagates() {
        struct Opaque;

        impl BloomKey for Opaque {
            fn canonical_bytes(&self) -> Result<Cow<'_, [u8]>, EncodingError> {
                Err(EncodingError::new("opaque values have no byte form"))
            }
        }

        let result = murmur3_generator().hash(&Opaque, 3, 15);
        assert!(matches!(result, Err(FilterError::Encoding(_))));
    }

    #[test]
    fn test_integer_keys_are_little_endian() {
        assert_eq!(
            0x0102_0304u32.canonical_bytes().unwrap().into_owned(),
            vec![0x04, 0x03, 0x02, 0x01]
        );
        assert_eq!(
            7usize.canonical_bytes().unwrap(),
            7u64.canonical_bytes().unwrap()
        );
        assert_eq!(
            'è'.canonical_bytes().unwrap().into_owned(),
            "è".as_bytes().to_vec()
        );
    }

    #[test]
    fn test_hash_uniformity() {
        let generator = murmur3_generator();
        let m = 1000;
        let k = 7;
        let mut counts = vec![0usize; 10];

        for i in 0..1000 {
            let element = format!("element_{}", i);
            for pos in generator.hash(&element, k, m).unwrap() {
                counts[pos / 100] += 1;
            }
        }

        // Each bucket should hold roughly 1000 * 7 / 10 = 700 positions
        let expected = 700;
        for (i, count) in counts.iter().enumerate() {
            assert!(
                *count >= expected / 2 && *count <= expected * 3 / 2,
                "Bucket {} has {} entries, expected ~{}",
                i,
                count,
                expected
            );
        }
    }
}
