//! Builds a [`CodecKind`] from a variant name.
//!
//! Unknown names are a usage error (exit code 1), not a data error — callers
//! at the CLI boundary surface [`CodecError::exit_code`] directly.

use super::cross::CrossCodec;
use super::error::CodecError;
use super::noncross::NonCrossCodec;
use super::overflow::{InnerLayout, OverflowCodec};
use super::CodecKind;

/// Default rank-based threshold used by the bare `"overflow"` variant name
/// and by `overflow-noncross` / `overflow-cross`.
pub const DEFAULT_OVERFLOW_THRESHOLD: f64 = 0.95;

/// `name` is one of `noncross`, `cross`, `overflow`, `overflow-noncross`,
/// `overflow-cross`. `overflow_threshold` overrides the default rank
/// fraction for any overflow variant; `None` uses [`DEFAULT_OVERFLOW_THRESHOLD`].
pub fn build(name: &str, overflow_threshold: Option<f64>) -> Result<CodecKind, CodecError> {
    let threshold = overflow_threshold.unwrap_or(DEFAULT_OVERFLOW_THRESHOLD);
    match name {
        "noncross" => Ok(CodecKind::NonCross(NonCrossCodec::new())),
        "cross" => Ok(CodecKind::Cross(CrossCodec::new())),
        "overflow" | "overflow-noncross" => Ok(CodecKind::Overflow(Box::new(OverflowCodec::new(
            InnerLayout::NonCross,
            threshold,
        )))),
        "overflow-cross" => Ok(CodecKind::Overflow(Box::new(OverflowCodec::new(
            InnerLayout::Cross,
            threshold,
        )))),
        other => Err(CodecError::UnknownVariant(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Codec;

    #[test]
    fn builds_each_known_variant() {
        for name in ["noncross", "cross", "overflow", "overflow-noncross", "overflow-cross"] {
            assert!(build(name, None).is_ok(), "{name} should build");
        }
    }

    #[test]
    fn unknown_name_is_usage_error() {
        let err = build("zigzag", None).unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::Usage);
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn built_codec_round_trips() {
        let mut codec = build("cross", None).unwrap();
        codec.compress(&[1, 2, 3, 4]).unwrap();
        assert_eq!(codec.decompress().unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn overflow_variant_threshold_override_is_honored() {
        let mut a = build("overflow", Some(0.5)).unwrap();
        let mut b = build("overflow", Some(0.99)).unwrap();
        let values: Vec<u64> = (1..=40).collect();
        a.compress(&values).unwrap();
        b.compress(&values).unwrap();
        assert_eq!(a.decompress().unwrap(), values);
        assert_eq!(b.decompress().unwrap(), values);
    }
}
