//! End-to-end test of the `archmap analyze` binary.

use assert_cmd::Command;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

const FACTS: &str = indoc! {r#"
    [
        {
            "name": "LoginActivity",
            "kind": "class",
            "file_path": "app/LoginActivity.kt",
            "package": "com.demo",
            "supertype": "android.app.Activity",
            "navigation": [{ "target": "HomeActivity" }]
        },
        {
            "name": "HomeActivity",
            "kind": "class",
            "file_path": "app/HomeActivity.kt",
            "package": "com.demo",
            "supertype": "android.app.Activity"
        }
    ]
"#};

#[test]
fn analyze_writes_model_json_to_output_file() {
    let dir = TempDir::new().unwrap();
    let facts_path = dir.path().join("facts.json");
    let output_path = dir.path().join("model.json");
    fs::write(&facts_path, FACTS).unwrap();

    Command::cargo_bin("archmap")
        .unwrap()
        .arg("analyze")
        .arg(&facts_path)
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    let model: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
    assert_eq!(model["components"].as_array().unwrap().len(), 2);
    assert_eq!(model["navigation_flows"].as_array().unwrap().len(), 1);
    assert_eq!(model["error"], serde_json::Value::Null);
    assert_eq!(
        model["components"][0]["layer"],
        serde_json::Value::String("Ui".to_string())
    );
}

#[test]
fn analyze_prints_to_stdout_without_output_flag() {
    let dir = TempDir::new().unwrap();
    let facts_path = dir.path().join("facts.json");
    fs::write(&facts_path, FACTS).unwrap();

    let assert = Command::cargo_bin("archmap")
        .unwrap()
        .arg("analyze")
        .arg(&facts_path)
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("\"user_flows\""));
}

#[test]
fn missing_facts_file_fails_with_context() {
    let assert = Command::cargo_bin("archmap")
        .unwrap()
        .arg("analyze")
        .arg("/definitely/not/here.json")
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("reading facts from"));
}
