//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Path to the degrees binary built by cargo for this test run
pub fn degrees_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_degrees"))
}

/// Run the degrees binary in the specified directory
pub fn run_degrees_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(degrees_binary())
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute degrees binary")
}

/// Run the binary and assert it succeeded, returning stdout
pub fn run_ok(dir: &Path, args: &[&str]) -> String {
    let output = run_degrees_in_dir(dir, args);
    assert!(
        output.status.success(),
        "degrees {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Run the binary with `--json` and parse stdout
pub fn run_json(dir: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let stdout = run_ok(dir, &full);
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("invalid JSON ({e}): {stdout}"))
}
