//! `bitpack`: a family of bit-packed integer codecs that compress arrays of
//! non-negative integers for compact transmission while keeping O(1) random
//! access to any element.
//!
//! Three packing layouts trade compression density against access
//! simplicity — [`codec::NonCrossCodec`] never straddles a word boundary,
//! [`codec::CrossCodec`] packs with zero wasted bits, and
//! [`codec::OverflowCodec`] splits the array into a small-width main stream
//! plus an exception list for outliers. All three share one capability set
//! (see [`codec::Codec`]) and are reachable through [`codec::factory::build`].
//!
//! [`envelope::Envelope`] (de)serialises a codec's post-compress state as
//! JSON; [`transmission`] compares raw vs. compressed transfer time;
//! [`bench`] generates synthetic workloads and times the core operations.

pub mod bench;
pub mod cli;
pub mod codec;
pub mod envelope;
pub mod rng;
pub mod timefn;
pub mod transmission;
pub mod util;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level convenience re-exports for the most common entry points.
// ─────────────────────────────────────────────────────────────────────────────

/// The capability set shared by all three packing strategies.
pub use codec::Codec;
/// Errors returned by codec operations, with a coarse [`codec::ErrorKind`]
/// used to pick a process exit code at the CLI boundary.
pub use codec::{CodecError, ErrorKind};
/// A codec instance of one of the three packing strategies.
pub use codec::CodecKind;
/// Builds a [`CodecKind`] from a variant name (`noncross`, `cross`,
/// `overflow`, `overflow-noncross`, `overflow-cross`).
pub use codec::factory::build as build_codec;
/// The JSON wire envelope pairing a codec's metadata with its packed words.
pub use envelope::Envelope;
