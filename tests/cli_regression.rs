//! CLI regression tests driving the `fpp` binary end to end.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    fs::write(&path, content).expect("fixture should be writable");
    path
}

#[test]
fn check_succeeds_on_a_valid_unit() {
    let path = fixture(
        "fpp_cli_valid.fpp",
        "namespace Shop {\nenum Color = Red | Green\nstring Email;\n}",
    );

    Command::cargo_bin("fpp")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok:"))
        .stdout(predicate::str::contains("2 definitions"));
}

#[test]
fn check_fails_with_a_diagnostic_on_an_invalid_unit() {
    let path = fixture("fpp_cli_invalid.fpp", "namespace Shop;\nuuid Id : Sorted;");

    Command::cargo_bin("fpp")
        .unwrap()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not allow conditions"))
        .stdout(predicate::str::contains("failed:"));
}

#[test]
fn check_fails_on_a_missing_file() {
    Command::cargo_bin("fpp")
        .unwrap()
        .arg("check")
        .arg("no-such-file.fpp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn ast_emits_json_with_qualified_names() {
    let path = fixture("fpp_cli_ast.fpp", "namespace Shop;\nstring Email;");

    Command::cargo_bin("fpp")
        .unwrap()
        .arg("ast")
        .arg(&path)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Shop\\\\Email"))
        .stdout(predicate::str::contains("\"type_name\": \"Email\""));
}
