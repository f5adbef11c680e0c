//! Command-line contract tests
//!
//! Each test runs the built binary in a fresh temp directory so no
//! calcdeck.toml from the developer's checkout leaks in.

use std::path::Path;
use std::process::{Command, Output};

fn calcdeck(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_calcdeck"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run calcdeck")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_shows_every_category() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["list"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("straight-line-depreciation"));
    assert!(text.contains("heart-rate-zones"));
    assert!(text.contains("golf-handicap"));
    assert!(text.contains("temperature-converter"));
}

#[test]
fn list_filters_by_category() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["list", "--category", "sports", "--format", "json"]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["golf-handicap"]);
}

#[test]
fn eval_prints_rounded_result() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(
        dir.path(),
        &[
            "eval",
            "straight-line-depreciation",
            "-i",
            "cost=100000",
            "-i",
            "salvage_value=10000",
            "-i",
            "useful_life=10",
        ],
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains("9,000.00"));
}

#[test]
fn eval_invalid_input_exits_with_2() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(
        dir.path(),
        &["eval", "inflation", "-i", "amount=100", "-i", "annual_rate=3", "-i", "years=0"],
    );
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("Invalid input for inflation"));
    assert!(text.contains("years"));
}

#[test]
fn eval_json_input_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(
        dir.path(),
        &[
            "eval",
            "EnterpriseValue",
            "--json",
            r#"{"market_cap": 500000, "total_debt": 100000, "cash": 50000}"#,
            "--format",
            "json",
        ],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["calculator"], "enterprise-value");
    let ev = json["outputs"]
        .as_array()
        .unwrap()
        .iter()
        .find(|o| o["key"] == "enterprise_value")
        .unwrap();
    assert_eq!(ev["display"], "550,000.00");
}

#[test]
fn unknown_calculator_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["eval", "mortgage"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown calculator"));
}

#[test]
fn convert_mass() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["convert", "1000", "mg", "g"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "1000 mg = 1.000 g");
}

#[test]
fn convert_rejects_mixed_dimensions() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["convert", "3", "kg", "ml"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn offline_quiz_uses_standard_report() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(
        dir.path(),
        &["quiz", "--answers", "4,4,4,4,4,4", "--offline", "--format", "json"],
    );
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["outcome"]["score"], 24);
    assert_eq!(json["outcome"]["category"], "Strategic Saver");
    assert_eq!(json["report"]["generated"], false);
}

#[test]
fn quiz_rejects_short_answer_list() {
    let dir = tempfile::tempdir().unwrap();
    let output = calcdeck(dir.path(), &["quiz", "--answers", "1,2", "--offline"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn init_then_disabled_calculator_is_hidden() {
    let dir = tempfile::tempdir().unwrap();
    assert!(calcdeck(dir.path(), &["init"]).status.success());
    assert!(dir.path().join("calcdeck.toml").exists());
    assert!(!calcdeck(dir.path(), &["init"]).status.success());

    std::fs::write(
        dir.path().join("calcdeck.toml"),
        "[calculators]\ndisabled = [\"burnout_risk\"]\n",
    )
    .unwrap();
    let text = stdout(&calcdeck(dir.path(), &["list"]));
    assert!(!text.contains("burnout-risk"));
    assert_eq!(
        calcdeck(dir.path(), &["describe", "burnout-risk"]).status.code(),
        Some(1)
    );
}

#[test]
fn project_config_sets_default_format() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("calcdeck.toml"), "[output]\nformat = \"json\"\n").unwrap();
    let output = calcdeck(dir.path(), &["convert", "1", "g", "mg"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["converted"], 1000.0);
}
