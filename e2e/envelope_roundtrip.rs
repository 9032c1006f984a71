// e2e/envelope_roundtrip.rs — envelope file format tests driven through the
// `bitpack` binary, covering every packing variant plus the overflow
// fallback-tagging rule.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn bitpack_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_bitpack") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("bitpack");
    p
}

fn compress(dir: &TempDir, values: &[u64], variant: &str, overflow_threshold: Option<f64>) -> PathBuf {
    let input = dir.path().join(format!("input-{variant}.json"));
    fs::write(&input, serde_json::to_string(values).unwrap()).unwrap();
    let envelope = dir.path().join(format!("envelope-{variant}.json"));

    let mut args = vec![
        "compress".to_string(),
        "--in".to_string(),
        input.to_str().unwrap().to_string(),
        "--out".to_string(),
        envelope.to_str().unwrap().to_string(),
        "--variant".to_string(),
        variant.to_string(),
    ];
    if let Some(t) = overflow_threshold {
        args.push("--overflow-threshold".to_string());
        args.push(t.to_string());
    }

    let status = Command::new(bitpack_bin())
        .args(&args)
        .status()
        .expect("failed to run bitpack compress");
    assert!(status.success(), "compress ({variant}) should exit 0");
    envelope
}

fn decompress(envelope: &PathBuf, dir: &TempDir, tag: &str) -> Vec<u64> {
    let out = dir.path().join(format!("decompressed-{tag}.json"));
    let status = Command::new(bitpack_bin())
        .args([
            "decompress",
            "--in",
            envelope.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack decompress");
    assert!(status.success(), "decompress ({tag}) should exit 0");
    serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap()
}

#[test]
fn noncross_envelope_round_trips() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = (0..64).map(|i| i % 16).collect();
    let envelope = compress(&dir, &values, "noncross", None);

    let text = fs::read_to_string(&envelope).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["variant"], "noncross");
    assert!(parsed.get("threshold").is_none(), "noncross envelope carries no threshold field");

    assert_eq!(decompress(&envelope, &dir, "noncross"), values);
}

#[test]
fn cross_envelope_round_trips() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = (0..500).map(|i| (i * 31) % 1000).collect();
    let envelope = compress(&dir, &values, "cross", None);

    let text = fs::read_to_string(&envelope).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["variant"], "cross");

    assert_eq!(decompress(&envelope, &dir, "cross"), values);
}

#[test]
fn overflow_envelope_carries_exception_list_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let mut values: Vec<u64> = vec![10; 90];
    values.extend_from_slice(&[70_000, 80_000, 90_000]);
    let envelope = compress(&dir, &values, "overflow", Some(0.9));

    let text = fs::read_to_string(&envelope).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["variant"], "overflow");
    assert!(parsed["threshold"].is_u64(), "two-tier envelope must carry a threshold");
    assert!(parsed["overflow"].is_array(), "two-tier envelope must carry an overflow list");
    assert!(!parsed["overflow"].as_array().unwrap().is_empty());

    assert_eq!(decompress(&envelope, &dir, "overflow"), values);
}

#[test]
fn overflow_falls_back_to_single_tier_tag_when_no_outliers_justify_it() {
    let dir = TempDir::new().unwrap();
    // Every value fits comfortably under a high rank threshold, so the
    // two-tier layout has nothing to win — the written variant tag must name
    // the fallback, not "overflow".
    let values: Vec<u64> = vec![1, 2, 3, 4, 5, 6, 7, 8];
    let envelope = compress(&dir, &values, "overflow", Some(1.0));

    let text = fs::read_to_string(&envelope).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_ne!(parsed["variant"], "overflow");
    assert!(parsed.get("threshold").is_none());

    assert_eq!(decompress(&envelope, &dir, "fallback"), values);
}

#[test]
fn get_matches_decompress_at_every_index() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = (0..40).map(|i| (i * 97) % 2000).collect();
    let envelope = compress(&dir, &values, "cross", None);

    for (i, expected) in values.iter().enumerate() {
        let output = Command::new(bitpack_bin())
            .args(["get", "--in", envelope.to_str().unwrap(), "--index", &i.to_string()])
            .output()
            .expect("failed to run bitpack get");
        assert!(output.status.success());
        let got: u64 = String::from_utf8_lossy(&output.stdout).trim().parse().unwrap();
        assert_eq!(got, *expected, "mismatch at index {i}");
    }
}

#[test]
fn malformed_envelope_json_is_a_data_error() {
    let dir = TempDir::new().unwrap();
    let envelope = dir.path().join("broken.json");
    fs::write(&envelope, "{ this is not valid json").unwrap();
    let out = dir.path().join("out.json");

    let status = Command::new(bitpack_bin())
        .args([
            "decompress",
            "--in",
            envelope.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack decompress");

    assert_eq!(status.code(), Some(2));
}

#[test]
fn decompress_missing_out_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let envelope = compress(&dir, &[1, 2, 3], "noncross", None);

    let status = Command::new(bitpack_bin())
        .args(["decompress", "--in", envelope.to_str().unwrap()])
        .status()
        .expect("failed to run bitpack decompress");

    assert_eq!(status.code(), Some(1), "missing --out should exit 1, not clap's own exit 2");
}

#[test]
fn envelope_with_inconsistent_word_count_is_a_data_error() {
    let dir = TempDir::new().unwrap();
    let envelope = dir.path().join("inconsistent.json");
    fs::write(
        &envelope,
        r#"{"variant":"noncross","n":10,"k":4,"words":[0]}"#,
    )
    .unwrap();
    let out = dir.path().join("out.json");

    let status = Command::new(bitpack_bin())
        .args([
            "decompress",
            "--in",
            envelope.to_str().unwrap(),
            "--out",
            out.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack decompress");

    assert_eq!(status.code(), Some(2));
}
