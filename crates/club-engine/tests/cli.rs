//! Integration tests for the `club-engine` binary: exit codes and the
//! split between stdout (report) and stderr (failures).

#![allow(clippy::unwrap_used)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

const DAY: &str = "\
3
09:00 19:00
10
08:48 1 client1
09:41 1 client1
09:48 1 client2
09:52 3 client1
09:54 2 client1 1
10:25 2 client2 2
10:58 1 client3
10:59 2 client3 3
11:30 1 client4
11:35 2 client4 2
11:45 3 client4
12:33 4 client1
12:43 4 client2
15:52 4 client4
";

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn engine(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_club-engine"))
        .current_dir(dir)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("CLUB_LOG_LEVEL")
        .env_remove("CLUB_LOG_FORMAT")
        .env_remove("CLUB_OUTPUT_FORMAT")
        .output()
        .unwrap()
}

#[test]
fn prints_report_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "day.txt", DAY);

    let out = engine(dir.path(), &["day.txt"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with("09:00\n08:48 1 client1\n08:48 13 NotOpenYet\n"));
    assert!(stdout.ends_with("19:00 11 client3\n19:00\n1 70 05:58\n2 30 02:18\n3 90 08:01\n"));
    assert!(out.stderr.is_empty());
}

#[test]
fn malformed_line_goes_to_stderr_with_status_one() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "bad.txt", "1\n09:00 19:00\n10\n09:00 1 a\n09:05 7 a\n");

    let out = engine(dir.path(), &["bad.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.ends_with("\n09:05 7 a\n") || stderr == "09:05 7 a\n");
}

#[test]
fn missing_input_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = engine(dir.path(), &["absent.txt"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}

#[test]
fn missing_argument_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = engine(dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn config_file_selects_json_output() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "day.txt", DAY);
    write_file(dir.path(), "club-config.yaml", "output:\n  format: json\n");

    let out = engine(dir.path(), &["day.txt"]);
    assert!(out.status.success());
    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["tables"][2]["revenue"], 90);
}

#[test]
fn format_flag_overrides_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "day.txt", DAY);
    write_file(dir.path(), "club-config.yaml", "output:\n  format: json\n");

    let out = engine(dir.path(), &["day.txt", "--format", "text"]);
    assert!(out.status.success());
    assert!(String::from_utf8(out.stdout).unwrap().starts_with("09:00\n"));
}

#[test]
fn broken_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "day.txt", DAY);
    write_file(dir.path(), "settings.yaml", "output: [unclosed\n");

    let out = engine(dir.path(), &["day.txt", "--config", "settings.yaml"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
}
