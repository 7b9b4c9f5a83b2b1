use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn llm_eval() -> Command {
    let mut cmd = Command::cargo_bin("llm-eval").unwrap();
    cmd.env_remove("RUST_LOG").arg("--no-color");
    cmd
}

#[test]
fn test_evaluate_json_output() {
    let output = llm_eval()
        .args(["evaluate", "--predicted", "abc", "--expected", "abd", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["MED (Average)"], serde_json::json!(1.0));
    assert!(report["BLEU"]["precisions"].is_array());
    assert!(report["ROUGE"]["rougeLsum"]["fmeasure"].is_number());
}

#[test]
fn test_evaluate_text_output_truncates_to_shorter_side() {
    llm_eval()
        .args(["evaluate", "-p", "A\nB", "-e", "A\nB\nC", "-o", "text"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Metrics:\nBLEU:"))
        .stdout(predicate::str::contains("MED (Average): 0"));
}

#[test]
fn test_evaluate_from_files() {
    let mut predicted = tempfile::NamedTempFile::new().unwrap();
    let mut expected = tempfile::NamedTempFile::new().unwrap();
    write!(predicted, "Line 1\nLine 2\nLine 3\nLine 4").unwrap();
    write!(expected, "Line 1\nLine 2\nLine 3\nLine 4").unwrap();

    llm_eval()
        .arg("evaluate")
        .arg("--predicted-file")
        .arg(predicted.path())
        .arg("--expected-file")
        .arg(expected.path())
        .args(["-o", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MED (Average)"))
        .stdout(predicate::str::contains("rougeLsum"));
}

#[test]
fn test_evaluate_request_rejects_non_string_fields() {
    let mut request = tempfile::NamedTempFile::new().unwrap();
    write!(request, r#"{{"predicted": 123, "expected": "x"}}"#).unwrap();

    llm_eval()
        .arg("evaluate")
        .arg("--request")
        .arg(request.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Both predictions and references must be strings.",
        ));
}

#[test]
fn test_evaluate_rejects_invalid_utf8_file() {
    let mut predicted = tempfile::NamedTempFile::new().unwrap();
    predicted.write_all(&[0xff, 0xfe, 0xfd]).unwrap();

    llm_eval()
        .arg("evaluate")
        .arg("--predicted-file")
        .arg(predicted.path())
        .args(["--expected", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input"));
}

#[test]
fn test_evaluate_requires_both_texts() {
    llm_eval()
        .args(["evaluate", "--predicted", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--expected"));
}

#[test]
fn test_config_file_controls_metrics() {
    let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(config, "[metrics]\nbleu_smooth = true\nrouge_types = [\"rouge1\"]").unwrap();

    let output = llm_eval()
        .arg("--config")
        .arg(config.path())
        .args(["evaluate", "-p", "Line 1\nLine 2", "-e", "Line 1\nLine 2", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["BLEU"]["bleu"], serde_json::json!(1.0));
    assert_eq!(report["ROUGE"].as_object().unwrap().len(), 1);
}

#[test]
fn test_generate_fails_cleanly_without_server() {
    llm_eval()
        .args(["--endpoint", "http://127.0.0.1:9", "generate", "Click a button", "-o", "json"])
        .env("LLM_EVAL_INFERENCE__MAX_RETRIES", "0")
        .env("LLM_EVAL_INFERENCE__TIMEOUT_SECONDS", "2")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Inference error"));
}
