//! CLI integration tests
//!
//! These tests drive the built `changetrail` binary against notification and
//! configuration files in a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_changetrail"))
        .current_dir(cwd)
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn records(output: &Output) -> Vec<serde_json::Value> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| serde_json::from_str(line).expect("each line is a JSON record"))
        .collect()
}

const CONFIG: &str = r#"
[[tables]]
entity = "Customer"
schema = "sales"
table = "Customers"
"#;

const UNIT_OF_WORK: &str = r#"
- state: added
  entity: { name: Customer_5E1F, base: Customer }
  current_values:
    Id: 10
    Name: Alice
    Address:
      City: NYC
- state: modified
  entity: { name: Customer }
  original_values: { Id: 7, Name: Bob, Age: 30 }
  current_values: { Id: 7, Name: Bob, Age: 31 }
- state: deleted
  entity: { name: Customer }
  original_values: { Id: 3, Name: Carol }
"#;

#[test]
fn test_cli_record_prints_one_record_per_change() {
    // GIVEN a unit of work with a create, an update and a delete
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "changetrail.toml", CONFIG);
    let changes = write(&dir, "changes.yaml", UNIT_OF_WORK);

    // WHEN recording it
    let output = run(
        &[
            "record",
            changes.to_str().unwrap(),
            "--user",
            "alice",
            "--config",
            config.to_str().unwrap(),
        ],
        dir.path(),
    );

    // THEN the command succeeds
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // AND prints one record per change, in order
    let records = records(&output);
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["operation"], "C");
    assert_eq!(records[0]["table_name"], "sales.Customers");
    assert_eq!(records[0]["record_id"], "10");
    assert_eq!(records[0]["new_value"], "[Id]=10 || [Name]=Alice || [Address.City]=NYC");
    assert!(records[0]["original_value"].is_null());

    assert_eq!(records[1]["operation"], "U");
    assert_eq!(records[1]["new_value"], "[Age]=31");
    assert_eq!(records[1]["original_value"], "[Age]=30");

    assert_eq!(records[2]["operation"], "D");
    assert_eq!(records[2]["record_id"], "3");
    assert!(records[2]["new_value"].is_null());

    // AND all records share the user and timestamp
    for record in &records {
        assert_eq!(record["user_token"], "alice");
        assert_eq!(record["timestamp"], records[0]["timestamp"]);
    }
}

#[test]
fn test_cli_record_accepts_single_json_notification() {
    // GIVEN a single notification written as JSON, with no config
    let dir = TempDir::new().unwrap();
    let change = write(
        &dir,
        "change.json",
        r#"{"state": "deleted", "entity": {"name": "Order"}, "original_values": {"Id": "O-1"}}"#,
    );

    // WHEN recording it
    let output = run(
        &["record", change.to_str().unwrap(), "--user", "bob"],
        dir.path(),
    );

    // THEN the unmapped entity gets an empty table name
    assert!(output.status.success());
    let records = records(&output);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["table_name"], "");
    assert_eq!(records[0]["original_value"], "[Id]=O-1");
}

#[test]
fn test_cli_record_rejects_unchanged_state() {
    // GIVEN a notification in the unchanged state
    let dir = TempDir::new().unwrap();
    let change = write(
        &dir,
        "change.yaml",
        "state: unchanged\nentity: { name: Customer }\noriginal_values: { Id: 1 }\n",
    );

    // WHEN recording it
    let output = run(
        &["record", change.to_str().unwrap(), "--user", "bob"],
        dir.path(),
    );

    // THEN the command fails and prints nothing on stdout
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not auditable"));
}

#[test]
fn test_cli_record_rejects_invalid_config() {
    // GIVEN a configuration with an empty key property
    let dir = TempDir::new().unwrap();
    let config = write(&dir, "bad.toml", "key_property = \"\"\n");
    let changes = write(&dir, "changes.yaml", UNIT_OF_WORK);

    // WHEN recording with it
    let output = run(
        &[
            "record",
            changes.to_str().unwrap(),
            "--user",
            "alice",
            "--config",
            config.to_str().unwrap(),
        ],
        dir.path(),
    );

    // THEN the command fails naming the configuration problem
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("key_property"));
}

#[test]
fn test_cli_diff_prints_summary() {
    // GIVEN two versions of a record
    let dir = TempDir::new().unwrap();
    let original = write(&dir, "before.yaml", "Name: Bob\nAddress:\n  City: NYC\n");
    let current = write(&dir, "after.yaml", "Name: Bob\nAddress:\n  City: LA\n");

    // WHEN diffing them
    let output = run(
        &["diff", original.to_str().unwrap(), current.to_str().unwrap()],
        dir.path(),
    );

    // THEN the summary lists the changed path
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1 property changed:"));
    assert!(stdout.contains("Address.City: NYC -> LA"));
}

#[test]
fn test_cli_diff_json_output() {
    // GIVEN two versions of a record
    let dir = TempDir::new().unwrap();
    let original = write(&dir, "before.json", r#"{"Name": "Bob", "Age": 30}"#);
    let current = write(&dir, "after.json", r#"{"Name": "Bob", "Age": 31}"#);

    // WHEN diffing them as JSON
    let output = run(
        &[
            "diff",
            original.to_str().unwrap(),
            current.to_str().unwrap(),
            "--json",
        ],
        dir.path(),
    );

    // THEN both delimited strings are reported
    assert!(output.status.success());
    let diff: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["new_value"], "[Age]=31");
    assert_eq!(diff["original_value"], "[Age]=30");
}

#[test]
fn test_cli_diff_shape_mismatch_fails() {
    // GIVEN two documents of different shape
    let dir = TempDir::new().unwrap();
    let original = write(&dir, "before.yaml", "Name: Bob\n");
    let current = write(&dir, "after.yaml", "Name: Bob\nAge: 31\n");

    // WHEN diffing them
    let output = run(
        &["diff", original.to_str().unwrap(), current.to_str().unwrap()],
        dir.path(),
    );

    // THEN the command fails naming the path
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Age"));
}
