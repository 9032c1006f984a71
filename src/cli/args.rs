//! Argument parsing via `clap`'s derive API: a plain subcommand tool with
//! no positional-alias behaviour to carry, so parsing goes straight through
//! `#[derive(Parser)]` / `#[derive(Subcommand)]`.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bitpack", about = "Bit-packed integer codec family", version)]
pub struct Cli {
    /// Verbosity: 0 silent, 1 errors, 2 normal (default), 3 verbose, 4 debug.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compress a JSON integer array into an envelope.
    Compress {
        /// Required; a missing value is a usage error (exit 1), not a clap
        /// parse failure, so it stays `Option` and is checked in `dispatch`.
        #[arg(long = "in")]
        input: Option<String>,
        #[arg(long = "out")]
        output: Option<String>,
        /// Codec variant: noncross, cross, overflow, overflow-noncross, overflow-cross.
        #[arg(long, default_value = "noncross")]
        variant: String,
        /// Rank fraction for overflow variants, in (0, 1].
        #[arg(long)]
        overflow_threshold: Option<f64>,
    },
    /// Decompress an envelope into a JSON integer array.
    Decompress {
        #[arg(long = "in")]
        input: Option<String>,
        #[arg(long = "out")]
        output: Option<String>,
    },
    /// Print the value at one index of an envelope without decompressing it.
    Get {
        #[arg(long = "in")]
        input: Option<String>,
        #[arg(long)]
        index: Option<usize>,
    },
    /// Generate a synthetic workload and report timing percentiles.
    Bench {
        #[arg(long, default_value_t = 100_000)]
        n: usize,
        #[arg(long, default_value = "noncross")]
        variant: String,
        #[arg(long)]
        overflow_threshold: Option<f64>,
        /// Upper bound (inclusive) on generated values.
        #[arg(long, default_value_t = u32::MAX as u64)]
        max_value: u64,
        #[arg(long, default_value_t = 16)]
        warmup_rounds: usize,
        #[arg(long, default_value_t = 64)]
        sample_rounds: usize,
        #[arg(long, default_value_t = 0xBADC0FFE)]
        seed: u32,
    },
    /// Compare transmission time of the raw array vs. the compressed envelope.
    Transmission {
        /// Derive sizes/timings from a previously written envelope.
        #[arg(long = "file")]
        file: Option<String>,
        #[arg(long)]
        uncompressed_bits: Option<f64>,
        #[arg(long)]
        compressed_bits: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        t_compress: f64,
        #[arg(long, default_value_t = 0.0)]
        t_decompress: f64,
        #[arg(long, default_value_t = 0.0)]
        latency: f64,
        /// Report across the full bandwidth ladder instead of one rate.
        #[arg(long, default_value_t = false)]
        sweep: bool,
        /// Single bandwidth in bits/s; ignored when `--sweep` is set.
        #[arg(long, default_value_t = 1e9)]
        bandwidth_bps: f64,
    },
    /// Guided REPL over the same operations.
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compress_with_defaults() {
        let cli = Cli::parse_from(["bitpack", "compress", "--in", "a.json", "--out", "b.env"]);
        match cli.command {
            Command::Compress { input, output, variant, overflow_threshold } => {
                assert_eq!(input.as_deref(), Some("a.json"));
                assert_eq!(output.as_deref(), Some("b.env"));
                assert_eq!(variant, "noncross");
                assert_eq!(overflow_threshold, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_get_index() {
        let cli = Cli::parse_from(["bitpack", "get", "--in", "a.env", "--index", "3"]);
        match cli.command {
            Command::Get { input, index } => {
                assert_eq!(input.as_deref(), Some("a.env"));
                assert_eq!(index, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn compress_without_in_parses_with_input_as_none() {
        // clap no longer rejects this at parse time — a missing `--in` is a
        // usage error the dispatcher classifies, not a clap parse failure.
        let cli = Cli::parse_from(["bitpack", "compress", "--out", "b.env"]);
        match cli.command {
            Command::Compress { input, .. } => assert_eq!(input, None),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn get_without_index_parses_with_index_as_none() {
        let cli = Cli::parse_from(["bitpack", "get", "--in", "a.env"]);
        match cli.command {
            Command::Get { index, .. } => assert_eq!(index, None),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_transmission_sweep_flag() {
        let cli = Cli::parse_from(["bitpack", "transmission", "--file", "a.env", "--sweep"]);
        match cli.command {
            Command::Transmission { sweep, file, .. } => {
                assert!(sweep);
                assert_eq!(file.as_deref(), Some("a.env"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_subcommand() {
        let result = Cli::try_parse_from(["bitpack", "frobnicate"]);
        assert!(result.is_err());
    }
}
