//! Verify that --json output and config files match the published schemas.

use jsonschema::Validator;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::NamedTempFile;

fn sql_dummy_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_sql-dummy"))
}

fn catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/shop_catalog.yaml")
}

fn load_schema(name: &str) -> Validator {
    let output = sql_dummy_bin().args(["schema", name]).output().unwrap();
    assert!(output.status.success(), "schema {} not available", name);
    let schema: Value = serde_json::from_slice(&output.stdout).expect("Invalid schema JSON");
    jsonschema::validator_for(&schema).expect("Failed to compile schema")
}

fn assert_valid(schema_name: &str, json: &Value) {
    let schema = load_schema(schema_name);
    if let Err(error) = schema.validate(json) {
        panic!(
            "JSON doesn't match {} schema:\n  - {}\n\nJSON was:\n{}",
            schema_name,
            error,
            serde_json::to_string_pretty(json).unwrap()
        );
    }
}

#[test]
fn test_schema_lists_names() {
    let output = sql_dummy_bin().arg("schema").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["config", "generate"]);
}

#[test]
fn test_generate_json_matches_schema() {
    let out = NamedTempFile::new().unwrap();
    let output = sql_dummy_bin()
        .args(["generate", "-t", "users,fake_table,orders", "--skip-invalid", "--json", "--catalog"])
        .arg(catalog_path())
        .arg("--output")
        .arg(out.path())
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "Command failed with stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["skipped"][0]["name"], "orders");
    assert_valid("generate", &json);
}

#[test]
fn test_config_example_matches_schema() {
    let yaml = "seed: 3\ndefault_count: 20\ntables:\n  - name: users\n    columns:\n      name: firstname\n";
    let config: Value = serde_yaml_ng::from_str(yaml).unwrap();
    assert_valid("config", &config);
}
