//! The bit-packing codec family.
//!
//! Three packing strategies share one capability set — `compress`,
//! `decompress`, `get`, `k`, `n` — expressed as a single sum type
//! ([`Codec`]) selected by [`factory::build`], rather than as a trait-object
//! hierarchy.

pub mod error;
pub mod factory;
pub mod geometry;
pub mod layout;

pub mod cross;
pub mod noncross;
pub mod overflow;

pub use cross::CrossCodec;
pub use error::{CodecError, ErrorKind};
pub use noncross::NonCrossCodec;
pub use overflow::{InnerLayout, OverflowCodec};

/// Upper bound on a single array element, `[0, 2^32 - 1]`.
pub const MAX_VALUE: u64 = u32::MAX as u64;

/// Validates that every element fits the value domain, returning the max
/// observed value (0 for an empty slice) on success.
pub(crate) fn validate_domain(values: &[u64]) -> Result<u64, CodecError> {
    let mut max_v = 0u64;
    for &v in values {
        if v > MAX_VALUE {
            return Err(CodecError::ValueOutOfRange { value: v, max: MAX_VALUE });
        }
        if v > max_v {
            max_v = v;
        }
    }
    Ok(max_v)
}

pub(crate) fn check_index(i: usize, n: usize) -> Result<(), CodecError> {
    if i >= n {
        Err(CodecError::IndexOutOfRange { index: i, len: n })
    } else {
        Ok(())
    }
}

/// The capability set every packing strategy implements.
///
/// `compress` is the sole mutating operation; `get`/`decompress` are
/// read-only and safe to call concurrently on the same instance as long as
/// no `compress` runs in parallel — a documented precondition, not an
/// enforced lock.
pub trait Codec {
    /// Replaces all prior state with a freshly packed representation of
    /// `values`. Transactional: on `Err`, the instance is left unchanged.
    fn compress(&mut self, values: &[u64]) -> Result<(), CodecError>;

    /// Returns `X[i]` without materialising the rest of the array.
    fn get(&self, i: usize) -> Result<u64, CodecError>;

    /// Reconstructs the full input array.
    fn decompress(&self) -> Result<Vec<u64>, CodecError>;

    /// Element count set by the last successful `compress`.
    fn n(&self) -> usize;

    /// Effective bit-width per slot (for overflow codecs, `k_main`).
    fn k(&self) -> u32;

    /// Number of 32-bit words in the packed representation.
    fn words_len(&self) -> usize;
}

/// A codec instance of one of the three packing strategies, holding its own
/// post-compress state.
#[derive(Debug, Clone)]
pub enum CodecKind {
    NonCross(NonCrossCodec),
    Cross(CrossCodec),
    Overflow(Box<OverflowCodec>),
}

impl Codec for CodecKind {
    fn compress(&mut self, values: &[u64]) -> Result<(), CodecError> {
        match self {
            CodecKind::NonCross(c) => c.compress(values),
            CodecKind::Cross(c) => c.compress(values),
            CodecKind::Overflow(c) => c.compress(values),
        }
    }

    fn get(&self, i: usize) -> Result<u64, CodecError> {
        match self {
            CodecKind::NonCross(c) => c.get(i),
            CodecKind::Cross(c) => c.get(i),
            CodecKind::Overflow(c) => c.get(i),
        }
    }

    fn decompress(&self) -> Result<Vec<u64>, CodecError> {
        match self {
            CodecKind::NonCross(c) => c.decompress(),
            CodecKind::Cross(c) => c.decompress(),
            CodecKind::Overflow(c) => c.decompress(),
        }
    }

    fn n(&self) -> usize {
        match self {
            CodecKind::NonCross(c) => c.n(),
            CodecKind::Cross(c) => c.n(),
            CodecKind::Overflow(c) => c.n(),
        }
    }

    fn k(&self) -> u32 {
        match self {
            CodecKind::NonCross(c) => c.k(),
            CodecKind::Cross(c) => c.k(),
            CodecKind::Overflow(c) => c.k(),
        }
    }

    fn words_len(&self) -> usize {
        match self {
            CodecKind::NonCross(c) => c.words_len(),
            CodecKind::Cross(c) => c.words_len(),
            CodecKind::Overflow(c) => c.words_len(),
        }
    }
}

/// Name of the variant actually in use. For an overflow codec that fell back
/// to single-tier packing, this is the fallback's own tag, not `"overflow"`.
impl CodecKind {
    pub fn variant_name(&self) -> &'static str {
        match self {
            CodecKind::NonCross(_) => "noncross",
            CodecKind::Cross(_) => "cross",
            CodecKind::Overflow(c) => c.inner_name(),
        }
    }
}
