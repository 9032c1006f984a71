// e2e/cli_integration.rs — CLI integration tests.
//
// Tests the `bitpack` binary as a black-box CLI tool using std::process::Command.
// Covers compress/decompress/get round trips, exit codes, and bench/transmission
// output.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `bitpack` binary produced by Cargo.
fn bitpack_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_bitpack") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("bitpack");
    p
}

fn write_values(dir: &TempDir, name: &str, values: &[u64]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(values).unwrap()).unwrap();
    path
}

// ── 1. Compress / decompress roundtrip ───────────────────────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = (0..200).map(|i| (i * 37) % 5000).collect();
    let input = write_values(&dir, "input.json", &values);
    let envelope = dir.path().join("envelope.json");
    let roundtrip = dir.path().join("roundtrip.json");

    let status = Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
            "--variant",
            "cross",
        ])
        .status()
        .expect("failed to run bitpack compress");
    assert!(status.success(), "compress step should exit 0");
    assert!(envelope.exists(), "envelope file should exist");

    let status = Command::new(bitpack_bin())
        .args([
            "decompress",
            "--in",
            envelope.to_str().unwrap(),
            "--out",
            roundtrip.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack decompress");
    assert!(status.success(), "decompress step should exit 0");

    let recovered: Vec<u64> =
        serde_json::from_str(&fs::read_to_string(&roundtrip).unwrap()).unwrap();
    assert_eq!(values, recovered, "roundtrip output must match original");
}

// ── 2. --version ──────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(bitpack_bin())
        .arg("--version")
        .output()
        .expect("failed to run bitpack --version");

    assert!(
        output.status.success(),
        "--version should exit 0; status: {}",
        output.status
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.to_lowercase().contains("bitpack"),
        "--version stdout should name the binary; got: {stdout}"
    );
}

// ── 3. --help ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_help() {
    let output = Command::new(bitpack_bin())
        .arg("--help")
        .output()
        .expect("failed to run bitpack --help");

    assert!(
        output.status.success(),
        "--help should exit 0; status: {}",
        output.status
    );
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(
        combined.to_lowercase().contains("usage"),
        "--help output should contain 'usage'; got: {combined}"
    );
}

// ── 4. get prints a single value without decompressing ──────────────────────

#[test]
fn test_cli_get_index() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = vec![11, 22, 33, 44, 55];
    let input = write_values(&dir, "input.json", &values);
    let envelope = dir.path().join("envelope.json");

    Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
            "--variant",
            "noncross",
        ])
        .status()
        .expect("compress step failed");

    let output = Command::new(bitpack_bin())
        .args(["get", "--in", envelope.to_str().unwrap(), "--index", "3"])
        .output()
        .expect("failed to run bitpack get");

    assert!(output.status.success(), "get should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "44");
}

// ── 5. get out of range is a data error (exit 2) ─────────────────────────────

#[test]
fn test_cli_get_out_of_range_exits_two() {
    let dir = TempDir::new().unwrap();
    let values: Vec<u64> = vec![1, 2, 3];
    let input = write_values(&dir, "input.json", &values);
    let envelope = dir.path().join("envelope.json");

    Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
        ])
        .status()
        .expect("compress step failed");

    let status = Command::new(bitpack_bin())
        .args(["get", "--in", envelope.to_str().unwrap(), "--index", "999"])
        .status()
        .expect("failed to run bitpack get");

    assert_eq!(status.code(), Some(2), "out-of-range get should exit 2");
}

// ── 6. Negative values in input are a usage-distinct data error ─────────────

#[test]
fn test_cli_compress_rejects_negative_values() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.json");
    fs::write(&input, "[1, -2, 3]").unwrap();
    let envelope = dir.path().join("envelope.json");

    let status = Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack compress");

    assert_eq!(status.code(), Some(2), "negative-value input should exit 2");
    assert!(!envelope.exists(), "no envelope should be written on failure");
}

// ── 7. Non-existent input ─────────────────────────────────────────────────────

#[test]
fn test_cli_nonexistent_input() {
    let dir = TempDir::new().unwrap();
    let status = Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            "/nonexistent_path_abc123_bitpack_test.json",
            "--out",
            dir.path().join("out.json").to_str().unwrap(),
        ])
        .status()
        .expect("failed to run bitpack with nonexistent input");

    assert!(!status.success(), "nonexistent input should exit non-zero");
}

// ── 8. Unknown codec variant is a usage error (exit 1) ───────────────────────

#[test]
fn test_cli_unknown_variant_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write_values(&dir, "input.json", &[1, 2, 3]);
    let envelope = dir.path().join("envelope.json");

    let status = Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
            "--variant",
            "zigzag",
        ])
        .status()
        .expect("failed to run bitpack compress");

    assert_eq!(status.code(), Some(1), "unknown variant should exit 1");
}

// ── 8b. Missing required flags are usage errors (exit 1), not clap's own
//        exit-2 parse failure ────────────────────────────────────────────────

#[test]
fn test_cli_compress_missing_in_exits_one() {
    let dir = TempDir::new().unwrap();
    let envelope = dir.path().join("envelope.json");

    let status = Command::new(bitpack_bin())
        .args(["compress", "--out", envelope.to_str().unwrap()])
        .status()
        .expect("failed to run bitpack compress");

    assert_eq!(status.code(), Some(1), "missing --in should exit 1");
}

#[test]
fn test_cli_compress_missing_out_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write_values(&dir, "input.json", &[1, 2, 3]);

    let status = Command::new(bitpack_bin())
        .args(["compress", "--in", input.to_str().unwrap()])
        .status()
        .expect("failed to run bitpack compress");

    assert_eq!(status.code(), Some(1), "missing --out should exit 1");
}

#[test]
fn test_cli_get_missing_index_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = write_values(&dir, "input.json", &[1, 2, 3]);
    let envelope = dir.path().join("envelope.json");

    Command::new(bitpack_bin())
        .args([
            "compress",
            "--in",
            input.to_str().unwrap(),
            "--out",
            envelope.to_str().unwrap(),
        ])
        .status()
        .expect("compress step failed");

    let status = Command::new(bitpack_bin())
        .args(["get", "--in", envelope.to_str().unwrap()])
        .status()
        .expect("failed to run bitpack get");

    assert_eq!(status.code(), Some(1), "missing --index should exit 1");
}

// ── 9. bench prints one JSON record to stdout ────────────────────────────────

#[test]
fn test_cli_bench_prints_json_report() {
    let output = Command::new(bitpack_bin())
        .args([
            "bench",
            "--n",
            "256",
            "--variant",
            "noncross",
            "--warmup-rounds",
            "1",
            "--sample-rounds",
            "2",
        ])
        .output()
        .expect("failed to run bitpack bench");

    assert!(output.status.success(), "bench should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("bench stdout should be JSON ({e}); got: {stdout}"));
    assert!(parsed.is_object(), "bench report should be a JSON object");
}

// ── 10. transmission --sweep prints a JSON array of reports ─────────────────

#[test]
fn test_cli_transmission_sweep_prints_json_array() {
    let output = Command::new(bitpack_bin())
        .args([
            "transmission",
            "--uncompressed-bits",
            "320000",
            "--compressed-bits",
            "80000",
            "--sweep",
        ])
        .output()
        .expect("failed to run bitpack transmission");

    assert!(output.status.success(), "transmission --sweep should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim())
        .unwrap_or_else(|e| panic!("transmission stdout should be JSON ({e}); got: {stdout}"));
    assert!(parsed.is_array(), "--sweep should print a JSON array");
}

// ── 11. transmission with neither --file nor sizes is a usage error ─────────

#[test]
fn test_cli_transmission_without_sizes_exits_one() {
    let status = Command::new(bitpack_bin())
        .arg("transmission")
        .status()
        .expect("failed to run bitpack transmission");

    assert_eq!(status.code(), Some(1), "missing size arguments should exit 1");
}
