use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

const SCENARIO: &str = "{240}aaaadead55665596a565aaaaa5a9555555555555696555566a5955555555";

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("rfsense"))
}

fn repo_root() -> std::path::PathBuf {
    let manifest = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .and_then(|p| p.parent())
        .expect("repo root")
        .to_path_buf()
}

fn sample_captures() -> std::path::PathBuf {
    repo_root()
        .join("tests")
        .join("golden")
        .join("mixed")
        .join("input.txt")
}

#[test]
fn help_supports_analyse_and_analyze() {
    cmd()
        .arg("file")
        .arg("analyse")
        .arg("--help")
        .assert()
        .success();
    cmd()
        .arg("file")
        .arg("analyze")
        .arg("--help")
        .assert()
        .success();
}

#[test]
fn decode_prints_formatted_fields() {
    cmd()
        .arg("decode")
        .arg(SCENARIO)
        .assert()
        .success()
        .stdout(
            contains("DYI Temperature Array Sensor")
                .and(contains("25.00C"))
                .and(contains("-0.50C"))
                .and(contains("3.70V")),
        );
}

#[test]
fn decode_json_outputs_reading() {
    let assert = cmd()
        .arg("decode")
        .arg(SCENARIO)
        .arg("--json")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["id"], 5);
    assert_eq!(value["temperature4_C"], 1.0);
    assert_eq!(value["vBatt"], 3.7);
}

#[test]
fn decode_rejection_shows_error_and_hint() {
    cmd()
        .arg("decode")
        .arg("{64}0000000000000000")
        .assert()
        .failure()
        .stderr(
            contains("error: capture rejected")
                .and(contains("sync word"))
                .and(contains("hint:")),
        );
}

#[test]
fn decode_invalid_text_is_reported() {
    cmd()
        .arg("decode")
        .arg("{8}xyz")
        .assert()
        .failure()
        .stderr(contains("invalid capture").and(contains("hint:")));
}

#[test]
fn verify_crc_from_config_file_rejects_zero_crc() {
    let temp = TempDir::new().expect("tempdir");
    let config = temp.path().join("config.json");
    std::fs::write(&config, r#"{"verify_crc": true}"#).expect("write config");

    cmd()
        .arg("decode")
        .arg(SCENARIO)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(contains("CRC mismatch"));

    cmd().arg("decode").arg(SCENARIO).assert().success();
}

#[test]
fn devices_lists_descriptor() {
    let assert = cmd().arg("devices").arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    let device = &value["devices"][0];
    assert_eq!(device["name"], "DIY Temperature Array Sensor");
    assert_eq!(device["modulation"], "fsk_pulse_pcm");
    assert_eq!(device["short_width"], 104);
    assert_eq!(device["reset_limit"], 9600);
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    let missing = temp.path().join("missing.txt");
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(missing)
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}

#[test]
fn stdout_outputs_json() {
    let input = sample_captures();
    let assert = cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let value: Value = serde_json::from_str(&stdout).expect("valid json");
    assert_eq!(value["summary"]["decoded_total"], 2);
}

#[test]
fn report_file_is_written() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("out").join("report.json");

    cmd()
        .arg("file")
        .arg("analyse")
        .arg(input)
        .arg("-o")
        .arg(&report)
        .arg("--pretty")
        .assert()
        .success()
        .stderr(contains("OK: report written"));

    let text = std::fs::read_to_string(&report).expect("read report");
    let value: Value = serde_json::from_str(&text).expect("valid json");
    assert_eq!(value["readings"][0]["line"], 2);
}

#[test]
fn stdout_and_report_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .arg("-o")
        .arg(report)
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn pretty_and_compact_conflict() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--pretty")
        .arg("--compact")
        .assert()
        .failure()
        .stderr(contains("error:"));
}

#[test]
fn quiet_suppresses_ok_message() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("OK:").not());
}

#[test]
fn list_failures_outputs_kinds() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--list-failures")
        .assert()
        .success()
        .stderr(contains("Decode failures:").and(contains("too_many_rows (1) lines: 3")));
}

#[test]
fn strict_fails_when_captures_are_rejected() {
    let temp = TempDir::new().expect("tempdir");
    let input = sample_captures();
    let report = temp.path().join("report.json");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("-o")
        .arg(report)
        .arg("--strict")
        .assert()
        .failure()
        .stderr(contains("4 of 6 captures could not be decoded"));
}

#[test]
fn strict_passes_on_clean_input() {
    let input = repo_root()
        .join("tests")
        .join("golden")
        .join("scenario")
        .join("input.txt");

    cmd()
        .arg("file")
        .arg("analyze")
        .arg(input)
        .arg("--stdout")
        .arg("--strict")
        .assert()
        .success();
}
