//! Two-tier overflow packing: a small-width main stream with a flag bit per
//! slot, plus an exception list for outliers.

use super::cross::CrossCodec;
use super::error::CodecError;
use super::geometry::bits_for;
use super::layout::{cross_get, cross_pack, noncross_get, noncross_pack};
use super::noncross::NonCrossCodec;
use super::{check_index, validate_domain, Codec};

/// Which packing scheme carries the main slot stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InnerLayout {
    NonCross,
    Cross,
}

impl InnerLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            InnerLayout::NonCross => "noncross",
            InnerLayout::Cross => "cross",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "noncross" => Some(InnerLayout::NonCross),
            "cross" => Some(InnerLayout::Cross),
            _ => None,
        }
    }
}

/// Rank-based threshold fraction, e.g. `0.95` for the 95th percentile cutoff
/// (default `0.95`).
fn default_threshold() -> f64 {
    0.95
}

/// Either the two-tier representation, or — when two-tier would not be
/// smaller than single-tier — a fallback to a plain single-tier codec. The
/// envelope reader never needs to know which happened:
/// [`OverflowCodec::inner_name`] reports the tag that should actually be
/// written.
#[derive(Debug, Clone)]
enum State {
    Empty,
    TwoTier {
        inner: InnerLayout,
        threshold: u64,
        k_low: u32,
        k_main: u32,
        n: usize,
        words: Vec<u32>,
        overflow: Vec<u32>,
    },
    Fallback(Box<super::CodecKind>),
}

#[derive(Debug, Clone)]
pub struct OverflowCodec {
    inner: InnerLayout,
    overflow_threshold: f64,
    state: State,
}

impl Default for OverflowCodec {
    fn default() -> Self {
        OverflowCodec {
            inner: InnerLayout::NonCross,
            overflow_threshold: default_threshold(),
            state: State::Empty,
        }
    }
}

impl OverflowCodec {
    pub fn new(inner: InnerLayout, overflow_threshold: f64) -> Self {
        OverflowCodec {
            inner,
            overflow_threshold,
            state: State::Empty,
        }
    }

    /// Reconstructs an instance already in two-tier form, e.g. from an
    /// envelope. Does not re-run the fallback decision — the envelope is
    /// trusted to already carry the variant that was actually used.
    pub fn from_parts(
        inner: InnerLayout,
        threshold: u64,
        k_low: u32,
        k_main: u32,
        n: usize,
        words: Vec<u32>,
        overflow: Vec<u32>,
    ) -> Self {
        OverflowCodec {
            inner,
            overflow_threshold: default_threshold(),
            state: State::TwoTier {
                inner,
                threshold,
                k_low,
                k_main,
                n,
                words,
                overflow,
            },
        }
    }

    /// The variant tag an envelope writer should actually record.
    pub fn inner_name(&self) -> &'static str {
        match &self.state {
            State::Empty => "overflow",
            State::TwoTier { .. } => "overflow",
            State::Fallback(codec) => codec.variant_name(),
        }
    }

    pub fn inner_layout(&self) -> InnerLayout {
        self.inner
    }

    /// `Some` only when in two-tier form.
    pub fn threshold(&self) -> Option<u64> {
        match &self.state {
            State::TwoTier { threshold, .. } => Some(*threshold),
            _ => None,
        }
    }

    pub fn k_low(&self) -> Option<u32> {
        match &self.state {
            State::TwoTier { k_low, .. } => Some(*k_low),
            _ => None,
        }
    }

    pub fn words(&self) -> Option<&[u32]> {
        match &self.state {
            State::TwoTier { words, .. } => Some(words),
            _ => None,
        }
    }

    pub fn overflow_values(&self) -> Option<&[u32]> {
        match &self.state {
            State::TwoTier { overflow, .. } => Some(overflow),
            _ => None,
        }
    }

    /// The fallback codec, if the overflow-capacity policy triggered one.
    pub fn fallback(&self) -> Option<&super::CodecKind> {
        match &self.state {
            State::Fallback(c) => Some(c),
            _ => None,
        }
    }

    fn pack_main(&self, slots: &[u64], k_main: u32) -> Vec<u32> {
        match self.inner {
            InnerLayout::NonCross => noncross_pack(slots, k_main),
            InnerLayout::Cross => cross_pack(slots, k_main),
        }
    }

    fn get_main(words: &[u32], inner: InnerLayout, k_main: u32, i: usize) -> u64 {
        match inner {
            InnerLayout::NonCross => noncross_get(words, k_main, i),
            InnerLayout::Cross => cross_get(words, k_main, i),
        }
    }
}

impl Codec for OverflowCodec {
    fn compress(&mut self, values: &[u64]) -> Result<(), CodecError> {
        validate_domain(values)?;

        if values.is_empty() {
            self.state = State::TwoTier {
                inner: self.inner,
                threshold: 0,
                k_low: 1,
                k_main: 0,
                n: 0,
                words: Vec::new(),
                overflow: Vec::new(),
            };
            return Ok(());
        }

        let n = values.len();

        // Rank index: ceil(p*n) - 1, zero-based, inclusive of ties.
        let mut sorted = values.to_vec();
        sorted.sort_unstable();
        let rank = ((self.overflow_threshold * n as f64).ceil() as i64 - 1)
            .clamp(0, n as i64 - 1) as usize;
        let t = sorted[rank];

        let overflow_count = values.iter().filter(|&&v| v > t).count() as u64;

        // k_low must be wide enough both to index the threshold itself and
        // to index every overflow slot by position.
        let k_low = bits_for(t)
            .max(bits_for(overflow_count.saturating_sub(1)))
            .max(1);
        let k_main = k_low + 1;
        let flag_bit = 1u64 << k_low;

        let mut slots = Vec::with_capacity(n);
        let mut overflow = Vec::new();
        for &v in values {
            if v <= t {
                slots.push(v);
            } else {
                let j = overflow.len() as u64;
                overflow.push(v as u32);
                slots.push(flag_bit | j);
            }
        }

        // Two-tier total cost vs single-tier cost, measured in the literal
        // bits the spec's non-regression property names: k_main*n +
        // 32*|overflow| vs k*n. Word-rounded capacity (e.g. NonCross's
        // floor(32/k)) does not track this linearly across widths, so
        // comparing packed word counts instead of bits can keep a two-tier
        // layout the spec's own invariant says must fall back.
        let single_tier_k = bits_for(values.iter().copied().max().unwrap_or(0)).max(1);
        let two_tier_bits = k_main as u64 * n as u64 + 32 * overflow.len() as u64;
        let single_tier_bits = single_tier_k as u64 * n as u64;

        if overflow.is_empty() || two_tier_bits > single_tier_bits {
            // Fall back to single-tier packing in the configured inner layout
            // the envelope then carries that variant's own tag.
            let mut fallback = match self.inner {
                InnerLayout::NonCross => super::CodecKind::NonCross(NonCrossCodec::new()),
                InnerLayout::Cross => super::CodecKind::Cross(CrossCodec::new()),
            };
            fallback.compress(values)?;
            self.state = State::Fallback(Box::new(fallback));
            return Ok(());
        }

        let words = self.pack_main(&slots, k_main);
        self.state = State::TwoTier {
            inner: self.inner,
            threshold: t,
            k_low,
            k_main,
            n,
            words,
            overflow,
        };
        Ok(())
    }

    fn get(&self, i: usize) -> Result<u64, CodecError> {
        match &self.state {
            State::Empty => Err(CodecError::IndexOutOfRange { index: i, len: 0 }),
            State::Fallback(codec) => codec.get(i),
            State::TwoTier {
                inner,
                k_low,
                k_main,
                n,
                words,
                overflow,
                ..
            } => {
                check_index(i, *n)?;
                let slot = Self::get_main(words, *inner, *k_main, i);
                let flag_bit = 1u64 << k_low;
                if slot & flag_bit == 0 {
                    Ok(slot)
                } else {
                    let j = (slot & (flag_bit - 1)) as u32;
                    overflow
                        .get(j as usize)
                        .map(|&v| v as u64)
                        .ok_or(CodecError::OverflowIndexOutOfRange { index: j, len: overflow.len() })
                }
            }
        }
    }

    fn decompress(&self) -> Result<Vec<u64>, CodecError> {
        match &self.state {
            State::Empty => Ok(Vec::new()),
            State::Fallback(codec) => codec.decompress(),
            State::TwoTier { n, .. } => (0..*n).map(|i| self.get(i)).collect(),
        }
    }

    fn n(&self) -> usize {
        match &self.state {
            State::Empty => 0,
            State::Fallback(codec) => codec.n(),
            State::TwoTier { n, .. } => *n,
        }
    }

    fn k(&self) -> u32 {
        match &self.state {
            State::Empty => 0,
            State::Fallback(codec) => codec.k(),
            State::TwoTier { k_main, .. } => *k_main,
        }
    }

    fn words_len(&self) -> usize {
        match &self.state {
            State::Empty => 0,
            State::Fallback(codec) => codec.words_len(),
            State::TwoTier { words, .. } => words.len(),
        }
    }
}
