//! End-to-end tests for the schemator binary
//!
//! Every test runs the binary inside its own temporary directory with an
//! isolated home, so no user configuration leaks in.

use pretty_assertions::assert_eq;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, TempDir};

fn schemator(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_schemator"));
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("SCHEMATOR_CONFIG")
        .env_remove("SCHEMATOR_LOG_LEVEL")
        .env_remove("SCHEMATOR_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn workspace() -> TempDir {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("schema.yaml"),
        "city_id: id\ncountry_data.name: country.name\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("city.json"),
        r#"{"id": 100, "name": "Novgorod", "country": {"id": 10, "name": "Russia"}}"#,
    )
    .unwrap();
    dir
}

#[test]
fn test_convert_file_to_json() {
    let dir = workspace();
    let output = schemator(dir.path())
        .args(["-o", "json", "convert", "schema.yaml", "city.json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "{\"city_id\":100,\"country_data\":{\"name\":\"Russia\"}}\n"
    );
}

#[test]
fn test_convert_from_stdin_to_yaml() {
    let dir = workspace();
    let mut cmd = schemator(dir.path());
    cmd.args(["--output", "yaml", "convert", "schema.yaml", "-"]);
    let output = run_with_stdin(cmd, r#"{"id": 1, "country": {"name": "Peru"}}"#);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "city_id: 1\ncountry_data:\n  name: Peru\n");
}

#[test]
fn test_convert_lines() {
    let dir = workspace();
    let mut cmd = schemator(dir.path());
    cmd.args(["-q", "convert", "schema.yaml", "--lines"]);
    let output = run_with_stdin(cmd, "{\"id\": 1}\n{\"id\": 2, \"country\": {\"name\": \"Chile\"}}\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "{\"city_id\":1,\"country_data\":{\"name\":null}}\n{\"city_id\":2,\"country_data\":{\"name\":\"Chile\"}}\n"
    );
}

#[test]
fn test_strict_failure_exit_code() {
    let dir = workspace();
    fs::write(dir.path().join("empty.json"), "{}").unwrap();
    let output = schemator(dir.path())
        .args(["convert", "schema.yaml", "empty.json", "--strict"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("error[CannotGetValue]"), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_get_with_custom_delimiter() {
    let dir = workspace();
    let output = schemator(dir.path())
        .args(["-d", "/", "get", "country/name", "city.json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "\"Russia\"\n");
}

#[test]
fn test_check_reports_issues() {
    let dir = workspace();
    fs::write(dir.path().join("bad.json"), r#"{"a": ["x", ["nope"]]}"#).unwrap();
    let output = schemator(dir.path())
        .args(["-o", "json", "check", "bad.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["valid"], false);
    assert_eq!(report["issues"][0]["output"], "a");
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = workspace();
    fs::write(
        dir.path().join(".schemator.toml"),
        "[converter]\nstrict = true\n\n[output]\nformat = \"json\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("empty.json"), "{}").unwrap();

    let output = schemator(dir.path())
        .args(["convert", "schema.yaml", "empty.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let output = schemator(dir.path())
        .args(["convert", "schema.yaml", "city.json"])
        .output()
        .unwrap();
    assert_eq!(
        stdout(&output),
        "{\"city_id\":100,\"country_data\":{\"name\":\"Russia\"}}\n"
    );
}

#[test]
fn test_missing_input_file() {
    let dir = workspace();
    let output = schemator(dir.path())
        .args(["convert", "schema.yaml", "nowhere.json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("File not found"));
}

#[test]
fn test_completions() {
    let dir = workspace();
    let output = schemator(dir.path())
        .args(["completions", "zsh"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).contains("schemator"));
}
