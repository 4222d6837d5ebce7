//! CLI integration tests
//!
//! These tests run the apichanges binary against temporary fixtures.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const WIDGET: &str = "package android.widget;\n\
import android.content.Context;\n\
public class Widget {\n\
    public Widget(Context context) {\n\
    }\n\
    public int getId() {\n\
        return 0;\n\
    }\n\
}\n";

fn apichanges(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("apichanges").unwrap();
    cmd.current_dir(dir).arg("--quiet");
    cmd
}

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Widget.java"), WIDGET).unwrap();
    dir
}

#[test]
fn test_help() {
    Command::cargo_bin("apichanges")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("flowdroid"));
}

#[test]
fn test_extract_file_to_json() {
    let dir = fixture();
    let output = apichanges(dir.path())
        .args(["extract", "Widget.java", "--base-url", "https://cs.android.com/Widget.java", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["name"], "Widget");
    assert_eq!(doc["implemented_methods"][0]["code"], "Widget(Context context)");
    assert_eq!(
        doc["implemented_methods"][0]["code_long"],
        "Widget(android.content.Context)"
    );
    assert_eq!(doc["implemented_methods"][1]["code_long"], "int getId()");
    assert_eq!(
        doc["implemented_methods"][1]["link"],
        "https://cs.android.com/Widget.java;l=6"
    );
}

#[test]
fn test_extract_from_stdin() {
    let dir = tempfile::tempdir().unwrap();
    apichanges(dir.path())
        .args(["extract", "-", "--base-url", "https://x", "--compact"])
        .write_stdin("class C { void m() {} }")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""code_long":"m()""#));
}

#[test]
fn test_extract_requires_base_url() {
    let dir = fixture();
    apichanges(dir.path())
        .args(["extract", "Widget.java"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No base URL"));
}

#[test]
fn test_empty_stdin_reported_before_missing_base_url() {
    let dir = tempfile::tempdir().unwrap();
    apichanges(dir.path())
        .args(["extract", "-"])
        .write_stdin("  \n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Java source code"))
        .stderr(predicate::str::contains("No base URL").not());
}

#[test]
fn test_extract_directory_requires_base_url() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    apichanges(dir.path())
        .args(["extract", "src"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No base URL"));
}

#[test]
fn test_extract_rejects_empty_source() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Empty.java"), "   \n").unwrap();
    apichanges(dir.path())
        .args(["extract", "Empty.java", "--base-url", "https://x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Java source code"));
}

#[test]
fn test_extract_directory_uses_relative_links() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/android/widget")).unwrap();
    fs::write(dir.path().join("src/android/widget/Widget.java"), WIDGET).unwrap();

    let output = apichanges(dir.path())
        .args(["extract", "src", "--base-url", "https://cs.android.com/base", "--compact", "--parallel"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let docs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(docs.as_array().map(Vec::len), Some(1));
    assert_eq!(
        docs[0]["implemented_methods"][0]["link"],
        "https://cs.android.com/base/android/widget/Widget.java;l=4"
    );
}

#[test]
fn test_extract_with_config_file() {
    let dir = fixture();
    fs::write(
        dir.path().join(".apichanges.yml"),
        "extraction:\n  base_url: https://configured\nreport:\n  pretty: false\n",
    )
    .unwrap();

    apichanges(dir.path())
        .args(["extract", "Widget.java"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://configured;l=4"));
}

#[test]
fn test_extract_output_file() {
    let dir = fixture();
    apichanges(dir.path())
        .args(["extract", "Widget.java", "--base-url", "https://x", "--output", "out.json"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("out.json")).unwrap();
    assert!(written.contains("\"name\": \"Widget\""));
}

const CHANGES: &str = r#"[
  {
    "package": "android.location",
    "changed_classes": [
      {
        "name": "LocationManager",
        "implemented_methods": [
          { "code": "Location getLast()", "code_long": "android.location.Location getLast()",
            "class": "Sensitive Source", "categories": ["Location"], "change_type": "Changed" },
          { "code": "void report(Location l)", "code_long": "report(android.location.Location)",
            "class": "Sensitive Sink", "categories": ["Location"], "change_type": "Addition" },
          { "code": "void reset()", "code_long": "reset()",
            "class": "Non-Sensitive", "category": null, "change_type": "Addition" }
        ]
      }
    ]
  }
]"#;

fn changes_fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("changes.json"), CHANGES).unwrap();
    dir
}

#[test]
fn test_list_with_filter() {
    let dir = changes_fixture();
    apichanges(dir.path())
        .args(["list", "changes.json", "--class", "sink"])
        .assert()
        .success()
        .stdout(predicate::str::contains("void report(Location l)"))
        .stdout(predicate::str::contains("void reset()").not());
}

#[test]
fn test_list_brief_hides_qualified_signatures() {
    let dir = changes_fixture();
    apichanges(dir.path())
        .args(["list", "changes.json", "--class", "sink"])
        .assert()
        .success()
        .stdout(predicate::str::contains("report(android.location.Location)"));

    apichanges(dir.path())
        .args(["list", "changes.json", "--class", "sink", "--brief"])
        .assert()
        .success()
        .stdout(predicate::str::contains("void report(Location l)"))
        .stdout(predicate::str::contains("report(android.location.Location)").not());
}

#[test]
fn test_stats() {
    let dir = changes_fixture();
    apichanges(dir.path())
        .args(["stats", "changes.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Location"))
        .stdout(predicate::str::contains("Category Unknown"));
}

#[test]
fn test_flowdroid_export() {
    let dir = changes_fixture();
    apichanges(dir.path())
        .args(["flowdroid", "changes.json", "--output", "defs.txt"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("defs.txt")).unwrap();
    assert_eq!(
        written,
        "<android.location.LocationManager: android.location.Location getLast()> -> _SOURCE_\n\
         <android.location.LocationManager: report(android.location.Location)> -> _SINK_"
    );
}

#[test]
fn test_invalid_change_log() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("changes.json"), "{ broken").unwrap();
    apichanges(dir.path())
        .args(["stats", "changes.json"])
        .assert()
        .failure();
}
