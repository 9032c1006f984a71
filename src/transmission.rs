//! Transmission-time comparison model: a pure function of sizes, timings,
//! bandwidth, and latency — no I/O, no codec dependency.

use serde::Serialize;

/// Fixed bandwidth ladder reported by a `transmission --sweep` (bits/s):
/// 1 Mbps, 10 Mbps, 100 Mbps, 1 Gbps, 10 Gbps.
pub const BANDWIDTH_LADDER_BPS: [f64; 5] = [1e6, 1e7, 1e8, 1e9, 1e10];

/// One bandwidth point's comparison result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransmissionReport {
    pub bandwidth_bps: f64,
    pub t_raw: f64,
    pub t_cmp: f64,
    pub compressed_wins: bool,
}

/// Inputs to the model, all in SI base units (bits, seconds).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionInput {
    pub uncompressed_bits: f64,
    pub compressed_bits: f64,
    pub t_compress: f64,
    pub t_decompress: f64,
    pub latency: f64,
}

/// `T_raw = latency + uncompressed/bw`,
/// `T_cmp = latency + t_compress + compressed/bw + t_decompress`.
pub fn compare(input: TransmissionInput, bandwidth_bps: f64) -> TransmissionReport {
    let t_raw = input.latency + input.uncompressed_bits / bandwidth_bps;
    let t_cmp = input.latency
        + input.t_compress
        + input.compressed_bits / bandwidth_bps
        + input.t_decompress;
    TransmissionReport {
        bandwidth_bps,
        t_raw,
        t_cmp,
        compressed_wins: t_cmp < t_raw,
    }
}

/// One report per rung of [`BANDWIDTH_LADDER_BPS`].
pub fn sweep(input: TransmissionInput) -> Vec<TransmissionReport> {
    BANDWIDTH_LADDER_BPS
        .iter()
        .map(|&bw| compare(input, bw))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransmissionInput {
        TransmissionInput {
            uncompressed_bits: 8_000_000.0,
            compressed_bits: 2_000_000.0,
            t_compress: 0.001,
            t_decompress: 0.0005,
            latency: 0.01,
        }
    }

    #[test]
    fn compressed_wins_on_a_slow_link() {
        let report = compare(sample(), 1e6);
        assert!(report.compressed_wins);
        assert!(report.t_cmp < report.t_raw);
    }

    #[test]
    fn raw_wins_when_codec_overhead_dominates_on_a_fast_link() {
        let input = TransmissionInput {
            uncompressed_bits: 1_000.0,
            compressed_bits: 900.0,
            t_compress: 1.0,
            t_decompress: 1.0,
            latency: 0.0,
        };
        let report = compare(input, 1e10);
        assert!(!report.compressed_wins);
    }

    #[test]
    fn latency_is_additive_on_both_sides() {
        let a = compare(sample(), 1e9);
        let mut with_latency = sample();
        with_latency.latency = 1.0;
        let b = compare(with_latency, 1e9);
        assert!((b.t_raw - a.t_raw - 1.0).abs() < 1e-9);
        assert!((b.t_cmp - a.t_cmp - 1.0).abs() < 1e-9);
    }

    #[test]
    fn sweep_covers_the_full_ladder_in_order() {
        let reports = sweep(sample());
        assert_eq!(reports.len(), 5);
        let bws: Vec<f64> = reports.iter().map(|r| r.bandwidth_bps).collect();
        assert_eq!(bws, BANDWIDTH_LADDER_BPS.to_vec());
        for w in bws.windows(2) {
            assert!(w[0] < w[1]);
        }
    }

    #[test]
    fn zero_compression_ratio_never_favors_compressed() {
        let input = TransmissionInput {
            uncompressed_bits: 1000.0,
            compressed_bits: 1000.0,
            t_compress: 0.5,
            t_decompress: 0.5,
            latency: 0.0,
        };
        let report = compare(input, 1e9);
        assert!(!report.compressed_wins);
    }
}
