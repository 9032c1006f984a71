//! Timing loop and percentile reporting for the bench harness.

use serde::Serialize;

use crate::codec::{Codec, CodecKind};
use crate::timefn::{clock_span_ns, get_time, DurationNs};

use super::config::BenchConfig;
use super::workload::generate;

/// Median and p95, in nanoseconds, over the sampled rounds of one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Percentiles {
    pub median_ns: DurationNs,
    pub p95_ns: DurationNs,
}

fn percentiles(mut samples: Vec<DurationNs>) -> Percentiles {
    samples.sort_unstable();
    let median = samples[samples.len() / 2];
    let p95_index = ((samples.len() as f64 * 0.95) as usize).min(samples.len() - 1);
    Percentiles { median_ns: median, p95_ns: samples[p95_index] }
}

/// One completed bench run: timing percentiles per operation plus the
/// observed compression ratio.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub n: usize,
    pub variant: String,
    pub compress: Percentiles,
    pub decompress: Percentiles,
    pub get: Percentiles,
    pub compression_ratio: f64,
}

/// Builds a workload from `cfg`, times `compress`/`decompress`/`get` over
/// `cfg.sample_rounds()` samples (after `cfg.warmup_rounds()` untimed
/// warm-up rounds), and reports the observed percentiles and ratio.
pub fn run(cfg: &BenchConfig, mut build: impl FnMut() -> CodecKind) -> BenchReport {
    let (values, order) = generate(cfg);
    let uncompressed_bits = values.len() as u64 * 32;

    for _ in 0..cfg.warmup_rounds() {
        let mut codec = build();
        codec.compress(&values).expect("warm-up compress");
        let _ = codec.decompress();
    }

    let mut compress_samples = Vec::with_capacity(cfg.sample_rounds());
    let mut decompress_samples = Vec::with_capacity(cfg.sample_rounds());
    let mut get_samples = Vec::with_capacity(cfg.sample_rounds());
    let mut last_words_len = 0usize;

    for _ in 0..cfg.sample_rounds() {
        let mut codec = build();

        let t0 = get_time();
        codec.compress(&values).expect("compress");
        compress_samples.push(clock_span_ns(t0));
        last_words_len = codec.words_len();

        let t1 = get_time();
        let _ = codec.decompress().expect("decompress");
        decompress_samples.push(clock_span_ns(t1));

        let t2 = get_time();
        for &i in &order {
            let _ = codec.get(i).expect("get");
        }
        get_samples.push(clock_span_ns(t2) / order.len().max(1) as u64);
    }

    let compressed_bits = last_words_len as u64 * 32;
    let compression_ratio = if compressed_bits == 0 {
        1.0
    } else {
        uncompressed_bits as f64 / compressed_bits as f64
    };

    BenchReport {
        n: cfg.n(),
        variant: cfg.variant().to_string(),
        compress: percentiles(compress_samples),
        decompress: percentiles(decompress_samples),
        get: percentiles(get_samples),
        compression_ratio,
    }
}
