//! JSON wire envelope: pairs a codec's post-compress state with enough
//! metadata to reconstruct it.

use serde::{Deserialize, Serialize};

use crate::codec::overflow::InnerLayout;
use crate::codec::{CodecError, CodecKind, Codec, CrossCodec, NonCrossCodec, OverflowCodec};

/// On-disk/wire record. Fields beyond the declared variant's requirements
/// are tolerated and ignored on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub variant: String,
    pub n: usize,
    pub k: u32,
    pub words: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub k_low: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inner: Option<String>,
}

impl Envelope {
    /// Builds the envelope for a codec's current (post-compress) state. The
    /// `variant` field carries the variant actually in effect — for an
    /// overflow codec that fell back to single-tier packing, that is the
    /// fallback's own tag, not `"overflow"`.
    pub fn from_codec(codec: &CodecKind) -> Self {
        match codec {
            CodecKind::NonCross(c) => Envelope {
                variant: "noncross".to_string(),
                n: c.n(),
                k: c.k(),
                words: c.words().to_vec(),
                threshold: None,
                k_low: None,
                overflow: None,
                inner: None,
            },
            CodecKind::Cross(c) => Envelope {
                variant: "cross".to_string(),
                n: c.n(),
                k: c.k(),
                words: c.words().to_vec(),
                threshold: None,
                k_low: None,
                overflow: None,
                inner: None,
            },
            CodecKind::Overflow(c) => match c.fallback() {
                Some(fallback) => {
                    let mut env = Envelope::from_codec(fallback);
                    env.variant = fallback.variant_name().to_string();
                    env
                }
                None => Envelope {
                    variant: "overflow".to_string(),
                    n: c.n(),
                    k: c.k(),
                    words: c.words().map(|w| w.to_vec()).unwrap_or_default(),
                    threshold: c.threshold(),
                    k_low: c.k_low(),
                    overflow: c.overflow_values().map(|o| o.to_vec()),
                    inner: Some(c.inner_layout().as_str().to_string()),
                },
            },
        }
    }

    /// Reconstructs a [`CodecKind`] from this record, validating required
    /// fields and internal consistency for the declared variant.
    pub fn to_codec(&self) -> Result<CodecKind, CodecError> {
        if self.k == 0 && self.n > 0 {
            return Err(CodecError::ZeroWidthNonEmpty);
        }

        match self.variant.as_str() {
            "noncross" => {
                check_word_len_noncross(self.n, self.k, self.words.len())?;
                Ok(CodecKind::NonCross(NonCrossCodec::from_parts(
                    self.n,
                    self.k,
                    self.words.clone(),
                )))
            }
            "cross" => {
                check_word_len_cross(self.n, self.k, self.words.len())?;
                Ok(CodecKind::Cross(CrossCodec::from_parts(
                    self.n,
                    self.k,
                    self.words.clone(),
                )))
            }
            "overflow" => {
                let threshold = self.threshold.ok_or(CodecError::MissingField("threshold"))?;
                let k_low = self.k_low.ok_or(CodecError::MissingField("k_low"))?;
                let overflow = self
                    .overflow
                    .clone()
                    .ok_or(CodecError::MissingField("overflow"))?;
                let inner_name = self.inner.as_deref().ok_or(CodecError::MissingField("inner"))?;
                let inner = InnerLayout::parse(inner_name)
                    .ok_or_else(|| CodecError::UnknownVariant(inner_name.to_string()))?;

                match inner {
                    InnerLayout::NonCross => check_word_len_noncross(self.n, self.k, self.words.len())?,
                    InnerLayout::Cross => check_word_len_cross(self.n, self.k, self.words.len())?,
                }

                Ok(CodecKind::Overflow(Box::new(OverflowCodec::from_parts(
                    inner,
                    threshold,
                    k_low,
                    self.k,
                    self.n,
                    self.words.clone(),
                    overflow,
                ))))
            }
            other => Err(CodecError::UnknownVariant(other.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

fn check_word_len_noncross(n: usize, k: u32, actual: usize) -> Result<(), CodecError> {
    let expected = if n == 0 {
        0
    } else {
        crate::codec::layout::noncross_word_count(n, k.max(1))
    };
    if expected != actual {
        return Err(CodecError::InconsistentWordsLength { expected, actual });
    }
    Ok(())
}

fn check_word_len_cross(n: usize, k: u32, actual: usize) -> Result<(), CodecError> {
    let expected = if n == 0 {
        0
    } else {
        crate::codec::layout::cross_word_count(n, k.max(1))
    };
    if expected != actual {
        return Err(CodecError::InconsistentWordsLength { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::factory;

    #[test]
    fn noncross_round_trips_through_json() {
        let mut codec = factory::build("noncross", None).unwrap();
        codec.compress(&[1, 5, 3, 7, 2, 8, 4, 6, 9, 10]).unwrap();
        let env = Envelope::from_codec(&codec);
        assert_eq!(env.variant, "noncross");
        let json = env.to_json().unwrap();
        let back = Envelope::from_json(&json).unwrap();
        let restored = back.to_codec().unwrap();
        assert_eq!(restored.decompress().unwrap(), codec.decompress().unwrap());
    }

    #[test]
    fn overflow_round_trips_through_json() {
        let mut codec = factory::build("overflow", Some(0.8)).unwrap();
        let values: Vec<u64> = vec![100, 200, 65000, 300, 400];
        codec.compress(&values).unwrap();
        let env = Envelope::from_codec(&codec);
        assert_eq!(env.variant, "overflow");
        assert_eq!(env.threshold, Some(400));
        let json = env.to_json().unwrap();
        let back = Envelope::from_json(&json).unwrap();
        let restored = back.to_codec().unwrap();
        assert_eq!(restored.decompress().unwrap(), values);
        assert_eq!(restored.get(2).unwrap(), 65000);
    }

    #[test]
    fn fallback_overflow_writes_the_actual_variant_tag() {
        // All values <= threshold -> the overflow codec degrades to
        // single-tier; the envelope must say so, not "overflow".
        let mut codec = factory::build("overflow", Some(1.0)).unwrap();
        codec.compress(&[1, 2, 3, 4, 5]).unwrap();
        let env = Envelope::from_codec(&codec);
        assert_ne!(env.variant, "overflow");
        assert!(env.threshold.is_none());
    }

    #[test]
    fn missing_required_field_is_envelope_error() {
        let env = Envelope {
            variant: "overflow".to_string(),
            n: 5,
            k: 10,
            words: vec![0, 0],
            threshold: None,
            k_low: Some(9),
            overflow: Some(vec![65000]),
            inner: Some("noncross".to_string()),
        };
        let err = env.to_codec().unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::Envelope);
    }

    #[test]
    fn inconsistent_words_length_is_envelope_error() {
        let env = Envelope {
            variant: "noncross".to_string(),
            n: 10,
            k: 4,
            words: vec![0], // should be 2 words for n=10, k=4
            threshold: None,
            k_low: None,
            overflow: None,
            inner: None,
        };
        let err = env.to_codec().unwrap_err();
        assert_eq!(err.kind(), crate::codec::ErrorKind::Envelope);
    }

    #[test]
    fn zero_width_nonempty_is_envelope_error() {
        let env = Envelope {
            variant: "noncross".to_string(),
            n: 3,
            k: 0,
            words: vec![],
            threshold: None,
            k_low: None,
            overflow: None,
            inner: None,
        };
        assert_eq!(env.to_codec().unwrap_err(), CodecError::ZeroWidthNonEmpty);
    }

    #[test]
    fn unknown_variant_tag_is_usage_like_envelope_error() {
        let env = Envelope {
            variant: "zigzag".to_string(),
            n: 0,
            k: 0,
            words: vec![],
            threshold: None,
            k_low: None,
            overflow: None,
            inner: None,
        };
        assert!(matches!(env.to_codec(), Err(CodecError::UnknownVariant(_))));
    }

    #[test]
    fn extra_fields_are_ignored_on_load() {
        let json = r#"{
            "variant": "noncross",
            "n": 4,
            "k": 1,
            "words": [0],
            "extra_field_from_a_future_version": 42
        }"#;
        let env = Envelope::from_json(json).unwrap();
        let codec = env.to_codec().unwrap();
        assert_eq!(codec.decompress().unwrap(), vec![0, 0, 0, 0]);
    }
}
