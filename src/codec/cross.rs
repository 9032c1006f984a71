//! Crossing packing: values are laid out contiguously in a bit stream with
//! zero wasted bits; a slot may straddle two words.

use super::error::CodecError;
use super::layout::{cross_get, cross_pack};
use super::{check_index, validate_domain, Codec};

/// Packs values back-to-back with no padding. Reads are two word loads, a
/// shift, an OR, and a mask.
#[derive(Debug, Clone, Default)]
pub struct CrossCodec {
    n: usize,
    k: u32,
    words: Vec<u32>,
}

impl CrossCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(n: usize, k: u32, words: Vec<u32>) -> Self {
        CrossCodec { n, k, words }
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }
}

impl Codec for CrossCodec {
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
        self.words = cross_pack(values, pack_width);
        Ok(())
    }

    fn get(&self, i: usize) -> Result<u64, CodecError> {
        check_index(i, self.n)?;
        Ok(cross_get(&self.words, self.k, i))
    }

    fn decompress(&self) -> Result<Vec<u64>, CodecError> {
        Ok((0..self.n).map(|i| cross_get(&self.words, self.k, i)).collect())
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
        let mut c = CrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.n(), 10);
        assert_eq!(c.k(), 4);
        assert_eq!(c.words_len(), 2); // ceil(40/32)
        assert_eq!(c.get(9).unwrap(), 10);
        assert_eq!(c.decompress().unwrap(), values);
    }

    #[test]
    fn all_zeros_width_one() {
        let values = vec![0u64; 4];
        let mut c = CrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.k(), 1);
        assert_eq!(c.words(), &[0]);
    }

    #[test]
    fn max_u32_value_uses_full_word() {
        let values = vec![u32::MAX as u64];
        let mut c = CrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.k(), 32);
        assert_eq!(c.get(0).unwrap(), u32::MAX as u64);
    }

    #[test]
    fn empty_array_round_trips() {
        let mut c = CrossCodec::new();
        c.compress(&[]).unwrap();
        assert_eq!(c.n(), 0);
        assert_eq!(c.k(), 0);
        assert_eq!(c.words_len(), 0);
        assert!(c.get(0).is_err());
    }

    #[test]
    fn cross_is_at_least_as_tight_as_noncross() {
        use super::super::noncross::NonCrossCodec;
        let values: Vec<u64> = vec![1, 5, 3, 7, 2, 8, 4, 6, 9, 10, 11, 12, 13];
        let mut nc = NonCrossCodec::new();
        let mut cr = CrossCodec::new();
        nc.compress(&values).unwrap();
        cr.compress(&values).unwrap();
        assert!(cr.words_len() <= nc.words_len());
    }

    #[test]
    fn cross_equals_noncross_when_k_divides_word_width() {
        use super::super::noncross::NonCrossCodec;
        // k=8 divides 32 evenly -> equal word counts.
        let values: Vec<u64> = vec![250; 9];
        let mut nc = NonCrossCodec::new();
        let mut cr = CrossCodec::new();
        nc.compress(&values).unwrap();
        cr.compress(&values).unwrap();
        assert_eq!(nc.k(), 8);
        assert_eq!(cr.words_len(), nc.words_len());
    }

    #[test]
    fn final_slot_straddle_reads_zero_high_word() {
        // max=20 -> k=5; 7*5 = 35 bits -> ceil(35/32) = 2 words, and the
        // last slot (i=6, bit offset 30) straddles into words[1], which
        // holds only 3 live bits.
        let values: Vec<u64> = vec![1, 2, 3, 4, 5, 6, 20];
        let mut c = CrossCodec::new();
        c.compress(&values).unwrap();
        assert_eq!(c.k(), 5);
        assert_eq!(c.words_len(), 2);
        assert_eq!(c.decompress().unwrap(), values);
        assert_eq!(c.get(6).unwrap(), 20);
    }
}
