//! Guided REPL over the same operations as the subcommands, driving a
//! single in-memory codec instance. Reads stdin directly the way
//! [`crate::util`]'s file helpers read a path — no line-editor dependency,
//! since this is a thin convenience wrapper, not the core product.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::bench::{self, BenchConfig, Distribution};
use crate::codec::{factory, Codec, CodecKind};
use crate::envelope::Envelope;
use crate::transmission::{self, TransmissionInput};

const HELP: &str = "\
commands:
  compress <variant> <v1,v2,...>   build a codec from literal values and print its envelope
  decompress                       print the full array of the loaded codec
  get <i>                          print the value at index i
  bench <n> <variant>              time compress/decompress/get over n random values
  transmission <bandwidth_bps>     compare raw vs. compressed transfer time for the loaded codec
  help                             show this message
  quit                             exit";

/// Runs the REPL to completion (EOF on stdin, or a `quit`/`exit` command).
pub fn run() {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        println!("bitpack interactive — type `help` for commands, `quit` to exit");
    }

    let mut codec: Option<CodecKind> = None;

    loop {
        print!("bitpack> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("quit") | Some("exit") => break,
            Some("help") => println!("{HELP}"),
            Some("compress") => handle_compress(&mut codec, parts.next(), parts.next()),
            Some("decompress") => handle_decompress(&codec),
            Some("get") => handle_get(&codec, parts.next()),
            Some("bench") => handle_bench(parts.next(), parts.next()),
            Some("transmission") => handle_transmission(&codec, parts.next()),
            Some(other) => eprintln!("unknown command: {other} (try `help`)"),
            None => {}
        }
    }
}

fn handle_compress(codec: &mut Option<CodecKind>, variant: Option<&str>, csv: Option<&str>) {
    let (Some(variant), Some(csv)) = (variant, csv) else {
        eprintln!("usage: compress <variant> <v1,v2,...>");
        return;
    };
    let values: Result<Vec<u64>, _> = csv.split(',').map(|s| s.trim().parse::<u64>()).collect();
    let values = match values {
        Ok(v) => v,
        Err(e) => {
            eprintln!("invalid value list: {e}");
            return;
        }
    };
    let mut built = match factory::build(variant, None) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    if let Err(e) = built.compress(&values) {
        eprintln!("{e}");
        return;
    }
    let envelope = Envelope::from_codec(&built);
    match envelope.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("{e}"),
    }
    *codec = Some(built);
}

fn handle_decompress(codec: &Option<CodecKind>) {
    match codec {
        None => eprintln!("no codec loaded; run `compress` first"),
        Some(c) => match c.decompress() {
            Ok(values) => println!("{values:?}"),
            Err(e) => eprintln!("{e}"),
        },
    }
}

fn handle_get(codec: &Option<CodecKind>, index: Option<&str>) {
    let Some(index) = index else {
        eprintln!("usage: get <i>");
        return;
    };
    let index: usize = match index.parse() {
        Ok(i) => i,
        Err(_) => {
            eprintln!("invalid index: {index}");
            return;
        }
    };
    match codec {
        None => eprintln!("no codec loaded; run `compress` first"),
        Some(c) => match c.get(index) {
            Ok(value) => println!("{value}"),
            Err(e) => eprintln!("{e}"),
        },
    }
}

fn handle_bench(n: Option<&str>, variant: Option<&str>) {
    let (Some(n), Some(variant)) = (n, variant) else {
        eprintln!("usage: bench <n> <variant>");
        return;
    };
    let n: usize = match n.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("invalid count: {n}");
            return;
        }
    };
    if factory::build(variant, None).is_err() {
        eprintln!("unknown codec variant: {variant}");
        return;
    }
    let mut cfg = BenchConfig::new();
    cfg.set_n(n)
        .set_variant(variant)
        .set_distribution(Distribution::Uniform)
        .set_warmup_rounds(4)
        .set_sample_rounds(16);
    let report = bench::run(&cfg, || factory::build(variant, None).expect("validated above"));
    println!("{report:?}");
}

fn handle_transmission(codec: &Option<CodecKind>, bandwidth_bps: Option<&str>) {
    let Some(codec) = codec else {
        eprintln!("no codec loaded; run `compress` first");
        return;
    };
    let bandwidth_bps: f64 = match bandwidth_bps.map(str::parse) {
        Some(Ok(bw)) => bw,
        Some(Err(_)) => {
            eprintln!("invalid bandwidth: {}", bandwidth_bps.unwrap());
            return;
        }
        None => 1e9,
    };
    let input = TransmissionInput {
        uncompressed_bits: codec.n() as f64 * 32.0,
        compressed_bits: codec.words_len() as f64 * 32.0,
        t_compress: 0.0,
        t_decompress: 0.0,
        latency: 0.0,
    };
    let report = transmission::compare(input, bandwidth_bps);
    println!("{report:?}");
}
