//! Non-crossing packing: `cap = floor(W/k)` values per 32-bit word, slots
//! never straddle a word boundary.

use super::error::CodecError;
use super::layout::{noncross_get, noncross_pack};
use super::{check_index, validate_domain, Codec};

/// Packs values so that no slot ever straddles two words. Reads are a single
/// word load, shift, and mask — no branch.
#[derive(Debug, Clone, Default)]
pub struct NonCrossCodec {
    n: usize,
    k: u32,
    words: Vec<u32>,
}

impl NonCrossCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an instance directly from already-packed state, e.g. when
    /// loading an envelope. Does not re-validate that `words` was produced
    /// by `compress` — callers (the envelope loader) are responsible for the
    /// `words.len()` consistency check.
    pub fn from_parts(n: usize, k: u32, words: Vec<u32>) -> Self {
        NonCrossCodec { n, k, words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl Codec for NonCrossCodec {
    fn compress(&mut self, values: &[u64]) -> Result<(), CodecError> {
        let max_v = validate_domain(values)?;
        let k = if values.is_empty() {
            0
        } else {
            super::geometry::bits_for(max_v).max(1)
        };
        let pack_width = k.max(1);
        self.n = values.len();
        self.k = k;
        self.words = noncross_pack(values, pack_width);
        Ok(())
    }

    fn get(&self, i: usize) -> Result<u64, CodecError> {
        check_index(i, self.n)?;
        Ok(noncross_get(&self.words, self.k, i))
    }

    fn decompress(&self) -> Result<Vec<u64>, CodecError> {
        Ok((0..self.n).map(|i| noncross_get(&self.words, self.k, i)).collect())
    }

    fn n(&self) -> usize {
        self.n
    }

    fn k(&self) -> u32 {
        self.k
    }

    fn words_len(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_mixed_values() {
        let values: Vec<u64> = vec![1, 5, 3, 7, 2, 8, 4, 6, 9, 10];
        let mut c = NonCrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.n(), 10);
        assert_eq!(c.k(), 4);
        assert_eq!(c.words_len(), 2);
        assert_eq!(c.get(3).unwrap(), 7);
        assert_eq!(c.decompress().unwrap(), values);
    }

    #[test]
    fn all_zeros_width_one() {
        let values = vec![0u64; 4];
        let mut c = NonCrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.k(), 1);
        assert_eq!(c.words(), &[0]);
        for i in 0..4 {
            assert_eq!(c.get(i).unwrap(), 0);
        }
    }

    #[test]
    fn max_u32_value_uses_full_word() {
        let values = vec![u32::MAX as u64];
        let mut c = NonCrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.k(), 32);
        assert_eq!(c.words(), &[u32::MAX]);
        assert_eq!(c.get(0).unwrap(), u32::MAX as u64);
    }

    #[test]
    fn empty_array_round_trips() {
        let mut c = NonCrossCodec::new();
        c.compress(&[]).unwrap();
        assert_eq!(c.n(), 0);
        assert_eq!(c.k(), 0);
        assert_eq!(c.words_len(), 0);
        assert_eq!(c.decompress().unwrap(), Vec::<u64>::new());
        assert!(c.get(0).is_err());
    }

    #[test]
    fn get_out_of_range_is_index_error() {
        let mut c = NonCrossCodec::new();
        c.compress(&[1, 2, 3]).unwrap();
        assert_eq!(c.get(3), Err(CodecError::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn value_out_of_range_is_rejected() {
        let mut c = NonCrossCodec::new();
        let err = c.compress(&[1, super::super::MAX_VALUE + 1]).unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::InputDomain);
    }

    #[test]
    fn length_multiple_of_capacity() {
        // k=4 -> cap=8; n=16 is exactly two full words.
        let values: Vec<u64> = (0..16).map(|i| i % 15).collect();
        let mut c = NonCrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.words_len(), 2);
        assert_eq!(c.decompress().unwrap(), values);
    }

    #[test]
    fn second_compress_replaces_prior_state() {
        let mut c = NonCrossCodec::new();
        c.compress(&[1, 2, 3]).unwrap();
        c.compress(&[100, 200]).unwrap();
        assert_eq!(c.n(), 2);
        assert_eq!(c.decompress().unwrap(), vec![100, 200]);
    }

    #[test]
    fn size_monotonic_in_max_value() {
        let small: Vec<u64> = vec![1, 2, 3, 4];
        let large: Vec<u64> = vec![1, 2, 3, 100_000];
        let mut c_small = NonCrossCodec::new();
        let mut c_large = NonCrossCodec::new();
        c_small.compress(&small).unwrap();
        c_large.compress(&large).unwrap();
        assert!(c_large.words_len() >= c_small.words_len());
    }
}
