//! End-to-end tests of the `skyview` binary
#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn sample_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/skyview_sample.csv")
}

fn skyview(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_skyview"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run skyview")
}

#[test]
fn test_showdates_prints_sessions() {
    let sample = sample_path();
    let output = skyview(&["showdates", sample.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "showdates failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Found 5 dates:");
    assert_eq!(
        lines[1],
        "Number. [StartSession--EndSession] [StartDateTime--EndDateTime] Duration"
    );
    assert!(lines[2].ends_with("1:05:26"));
}

#[test]
fn test_showdates_with_bounds() {
    let sample = sample_path();
    let output = skyview(&[
        "showdates",
        sample.to_str().unwrap(),
        "--start",
        "2017-02-02",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Found 1 dates:"));
}

#[test]
fn test_filter_to_outfile() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let out_path = temp_dir.path().join("test.csv");
    let sample = sample_path();

    let output = skyview(&[
        "filter",
        sample.to_str().unwrap(),
        "--start",
        "2017-01-29",
        "--end",
        "2017-02-01",
        "--outfile",
        out_path.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "filter failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "filter to file should not print rows");

    let content = fs::read_to_string(&out_path).expect("Failed to read filtered file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("Session Time,"));
    assert!(lines.iter().skip(1).all(|l| !l.contains("2017-02-01")));
}

#[test]
fn test_filter_to_stdout_without_bounds() {
    let sample = sample_path();
    let output = skyview(&["filter", sample.to_str().unwrap()]);
    assert!(output.status.success());

    let original = fs::read_to_string(&sample).unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), original);
}

#[test]
fn test_filter_keeps_line_endings_quotes_and_blank_lines() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let input = temp_dir.path().join("crlf.csv");
    fs::write(
        &input,
        "Session Time,a,b,Date\r\n\
         0.5,\"w\",y,2017-01-27 09:00:00\r\n\
         1.0,\"x\",y,2017-01-28 10:00:00\r\n\
         \r\n\
         2.0,\"x, y\",z,2017-01-28 10:00:01\r\n",
    )
    .unwrap();

    let output = skyview(&["filter", input.to_str().unwrap(), "--start", "2017-01-28"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Session Time,a,b,Date\r\n\
         1.0,\"x\",y,2017-01-28 10:00:00\r\n\
         \r\n\
         2.0,\"x, y\",z,2017-01-28 10:00:01\r\n"
    );
}

#[test]
fn test_rejects_non_skyview_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.csv");
    fs::write(&path, "Time,Value\n1,2\n").unwrap();

    for command in ["showdates", "filter"] {
        let output = skyview(&[command, path.to_str().unwrap()]);
        assert!(!output.status.success(), "{command} should reject the file");
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Session Time"));
    }
}

#[test]
fn test_header_only_input() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.csv");
    fs::write(&path, "Session Time,a,b,Date Time\n").unwrap();

    let output = skyview(&["showdates", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "No dates found.\n");

    let output = skyview(&["filter", path.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Session Time,a,b,Date Time\n"
    );
}
