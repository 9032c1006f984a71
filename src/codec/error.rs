//! Errors shared by the codec core.
//!
//! Small `Debug + Clone + PartialEq` error enums at the codec boundary,
//! additionally implementing `Display` and `std::error::Error` — the CLI
//! needs real diagnostic text and a stable `ErrorKind` to pick an exit code.

use std::fmt;

/// Coarse classification used to select a process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown variant name, missing required flag.
    Usage,
    /// Element out of `[0, 2^32 - 1]`, or not an integer.
    InputDomain,
    /// `get(i)` with `i` outside `[0, n)`.
    Index,
    /// Malformed or internally inconsistent envelope.
    Envelope,
}

/// Errors returned by codec operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// `compress` or the factory was asked for an unrecognised variant name.
    UnknownVariant(String),
    /// An input element exceeded the 32-bit non-negative domain.
    ValueOutOfRange { value: u64, max: u64 },
    /// `get(i)` with `i >= n`.
    IndexOutOfRange { index: usize, len: usize },
    /// A required envelope field was absent for the declared variant.
    MissingField(&'static str),
    /// `words.len()` was inconsistent with `n` and `k` for the declared layout.
    InconsistentWordsLength { expected: usize, actual: usize },
    /// `k == 0` while `n > 0`.
    ZeroWidthNonEmpty,
    /// An overflow-variant envelope referenced an out-of-range `overflow[]` index.
    OverflowIndexOutOfRange { index: u32, len: usize },
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::UnknownVariant(_) => ErrorKind::Usage,
            CodecError::ValueOutOfRange { .. } => ErrorKind::InputDomain,
            CodecError::IndexOutOfRange { .. } => ErrorKind::Index,
            CodecError::MissingField(_)
            | CodecError::InconsistentWordsLength { .. }
            | CodecError::ZeroWidthNonEmpty
            | CodecError::OverflowIndexOutOfRange { .. } => ErrorKind::Envelope,
        }
    }

    /// Process exit code: 1 for usage errors, 2 for data errors.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Usage => 1,
            ErrorKind::InputDomain | ErrorKind::Index | ErrorKind::Envelope => 2,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::UnknownVariant(name) => write!(f, "unknown codec variant: {name}"),
            CodecError::ValueOutOfRange { value, max } => {
                write!(f, "value {value} exceeds the maximum representable value {max}")
            }
            CodecError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for array of length {len}")
            }
            CodecError::MissingField(name) => write!(f, "envelope missing required field `{name}`"),
            CodecError::InconsistentWordsLength { expected, actual } => write!(
                f,
                "envelope words length {actual} inconsistent with n/k (expected {expected})"
            ),
            CodecError::ZeroWidthNonEmpty => write!(f, "envelope has k=0 but n>0"),
            CodecError::OverflowIndexOutOfRange { index, len } => write!(
                f,
                "overflow slot index {index} out of range for overflow array of length {len}"
            ),
        }
    }
}

impl std::error::Error for CodecError {}
