//! Post-parse operation dispatch: file I/O of the documented JSON envelope
//! and the JSON integer-array format, wired to the library's codec/envelope/
//! bench/transmission APIs. Converts a core error into a diagnostic and the
//! exit code it names.

use std::fmt;
use std::fs;

use crate::bench;
use crate::codec::{factory, Codec, CodecError};
use crate::envelope::Envelope;
use crate::transmission::{self, TransmissionInput};
use crate::util;

use super::args::{Cli, Command};
use super::interactive;

/// Errors surfaced at the CLI boundary: a core [`CodecError`] passed through
/// unchanged, or an I/O/JSON/parse failure that has no core representation.
#[derive(Debug)]
pub enum CliError {
    Codec(CodecError),
    InvalidInputValue(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    MissingArg(&'static str),
}

impl CliError {
    /// Exit code per the documented convention: 1 for usage errors, 2 for
    /// every other data/I/O failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Codec(e) => e.exit_code(),
            CliError::MissingArg(_) => 1,
            CliError::InvalidInputValue(_) | CliError::Io(_) | CliError::Json(_) => 2,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Codec(e) => write!(f, "{e}"),
            CliError::InvalidInputValue(msg) => write!(f, "{msg}"),
            CliError::Io(e) => write!(f, "{e}"),
            CliError::Json(e) => write!(f, "{e}"),
            CliError::MissingArg(name) => write!(f, "missing required argument: {name}"),
        }
    }
}

impl From<CodecError> for CliError {
    fn from(e: CodecError) -> Self {
        CliError::Codec(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

/// `Some(v)` passes through; `None` becomes the documented usage error (exit
/// 1) for a required flag clap itself was told not to enforce — `--in`,
/// `--out`, and `--index` are parsed as `Option` precisely so a missing one
/// reaches this classification instead of clap's own exit-2 parse failure.
fn require<T>(value: Option<T>, name: &'static str) -> Result<T, CliError> {
    value.ok_or(CliError::MissingArg(name))
}

/// Runs the parsed command, returning the process exit code.
pub fn run(cli: Cli) -> i32 {
    let result = match cli.command {
        Command::Compress { input, output, variant, overflow_threshold } => {
            require(input, "--in").and_then(|input| {
                require(output, "--out")
                    .and_then(|output| cmd_compress(&input, &output, &variant, overflow_threshold))
            })
        }
        Command::Decompress { input, output } => require(input, "--in")
            .and_then(|input| require(output, "--out").and_then(|output| cmd_decompress(&input, &output))),
        Command::Get { input, index } => {
            require(input, "--in").and_then(|input| require(index, "--index").and_then(|index| cmd_get(&input, index)))
        }
        Command::Bench { n, variant, overflow_threshold, max_value, warmup_rounds, sample_rounds, seed } => {
            cmd_bench(n, &variant, overflow_threshold, max_value, warmup_rounds, sample_rounds, seed)
        }
        Command::Transmission {
            file,
            uncompressed_bits,
            compressed_bits,
            t_compress,
            t_decompress,
            latency,
            sweep,
            bandwidth_bps,
        } => cmd_transmission(
            file.as_deref(),
            uncompressed_bits,
            compressed_bits,
            t_compress,
            t_decompress,
            latency,
            sweep,
            bandwidth_bps,
        ),
        Command::Interactive => {
            interactive::run();
            Ok(())
        }
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("bitpack: {e}");
            e.exit_code()
        }
    }
}

/// Parses a JSON array of integers, classifying negative and non-integer
/// elements as input-domain errors distinct from a malformed-JSON error.
fn parse_values(text: &str) -> Result<Vec<u64>, CliError> {
    let raw: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut values = Vec::with_capacity(raw.len());
    for v in raw {
        match v.as_u64() {
            Some(u) => values.push(u),
            None => {
                if let Some(i) = v.as_i64() {
                    return Err(CliError::InvalidInputValue(format!(
                        "negative value {i} is not a valid element"
                    )));
                }
                return Err(CliError::InvalidInputValue(format!(
                    "non-integer element {v} is not a valid element"
                )));
            }
        }
    }
    Ok(values)
}

fn cmd_compress(
    input: &str,
    output: &str,
    variant: &str,
    overflow_threshold: Option<f64>,
) -> Result<(), CliError> {
    let text = fs::read_to_string(input)?;
    let values = parse_values(&text)?;

    let mut codec = factory::build(variant, overflow_threshold)?;
    codec.compress(&values)?;

    crate::displaylevel!(3, "packed {} values into {} words\n", values.len(), codec.words_len());

    let envelope = Envelope::from_codec(&codec);
    fs::write(output, envelope.to_json()?)?;

    if let Ok(size) = util::get_file_size(std::path::Path::new(output)) {
        crate::displaylevel!(2, "wrote envelope {} ({} bytes)\n", output, size);
    }
    Ok(())
}

fn cmd_decompress(input: &str, output: &str) -> Result<(), CliError> {
    let text = fs::read_to_string(input)?;
    let envelope = Envelope::from_json(&text)?;
    let codec = envelope.to_codec()?;
    let values = codec.decompress()?;
    fs::write(output, serde_json::to_string(&values)?)?;
    Ok(())
}

fn cmd_get(input: &str, index: usize) -> Result<(), CliError> {
    let text = fs::read_to_string(input)?;
    let envelope = Envelope::from_json(&text)?;
    let codec = envelope.to_codec()?;
    let value = codec.get(index)?;
    println!("{value}");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_bench(
    n: usize,
    variant: &str,
    overflow_threshold: Option<f64>,
    max_value: u64,
    warmup_rounds: usize,
    sample_rounds: usize,
    seed: u32,
) -> Result<(), CliError> {
    // Validate the variant name up front so an unknown variant surfaces as a
    // usage error before any workload is generated.
    factory::build(variant, overflow_threshold)?;

    let mut cfg = bench::config::BenchConfig::new();
    cfg.set_n(n)
        .set_variant(variant)
        .set_overflow_threshold(overflow_threshold)
        .set_max_value(max_value)
        .set_warmup_rounds(warmup_rounds)
        .set_sample_rounds(sample_rounds)
        .set_seed(seed);

    let report = bench::report::run(&cfg, || factory::build(variant, overflow_threshold).expect("validated above"));
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_transmission(
    file: Option<&str>,
    uncompressed_bits: Option<f64>,
    compressed_bits: Option<f64>,
    t_compress: f64,
    t_decompress: f64,
    latency: f64,
    sweep: bool,
    bandwidth_bps: f64,
) -> Result<(), CliError> {
    let (uncompressed_bits, compressed_bits) = match file {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            let envelope = Envelope::from_json(&text)?;
            let overflow_words = envelope.overflow.as_ref().map(|o| o.len()).unwrap_or(0);
            let compressed = (envelope.words.len() + overflow_words) as f64 * 32.0;
            let uncompressed = envelope.n as f64 * 32.0;
            (uncompressed, compressed)
        }
        None => {
            let u = uncompressed_bits.ok_or(CliError::MissingArg("uncompressed_bits or --file"))?;
            let c = compressed_bits.ok_or(CliError::MissingArg("compressed_bits or --file"))?;
            (u, c)
        }
    };

    let input = TransmissionInput { uncompressed_bits, compressed_bits, t_compress, t_decompress, latency };

    if sweep {
        let reports = transmission::sweep(input);
        println!("{}", serde_json::to_string(&reports)?);
    } else {
        let report = transmission::compare(input, bandwidth_bps);
        println!("{}", serde_json::to_string(&report)?);
    }
    Ok(())
}
