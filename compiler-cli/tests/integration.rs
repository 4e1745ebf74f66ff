//! Checks for regressions in the CLI interface code
//!
//! To skip unit tests, and only run integration tests, execute:
//!
//! ```sh
//! cargo test --test integration
//! ```

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::{path::PathBuf, process::Command};

const ROOT_DIR: &str = env!("CARGO_MANIFEST_DIR");

fn fixture(name: &str) -> PathBuf {
    [ROOT_DIR, "tests", "fixtures", name].iter().collect()
}

fn elaborate(fixture_name: &str) -> Command {
    let mut cmd = Command::cargo_bin("elaborate").unwrap();
    cmd.env("TERM", "dumb");
    cmd.env_remove("RUST_LOG");
    cmd.env_remove("MEASURE_STDERR");
    cmd.env_remove("MEASURE_JSON");
    cmd.arg(fixture(fixture_name));
    cmd
}

#[test]
fn well_typed_program_succeeds_silently() {
    elaborate("well_typed.json")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Elaboration finished successfully without warnings",
        ));
}

#[test]
fn type_error_is_reported_with_line() {
    elaborate("type_errors.json")
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error: add type mismatch: expected `int`, found `boolean`")
                .and(predicate::str::contains("--> line 2"))
                .and(predicate::str::contains("Elaboration failed with an error")),
        );
}

#[test]
fn unused_variables_are_listed_on_stdout() {
    elaborate("unused.json")
        .assert()
        .success()
        .stdout(
            "unused local `x` in `A.m` (line 7)\n\
             unused local `y` in `A.m` (line 8)\n",
        );
}

#[test]
fn unused_report_can_be_switched_off() {
    elaborate("unused.json")
        .arg("--no-unused")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn strict_checks_are_opt_in() {
    elaborate("strict.json").assert().success();

    elaborate("strict.json")
        .args(&["--strict-check", "not-operand"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("not type mismatch: expected `boolean`, found `int`")
                .and(predicate::str::contains("return value of method").not())
                .and(predicate::str::contains("Elaboration failed with an error")),
        );

    elaborate("strict.json")
        .arg("--strict")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains(
                "return value of method `m` type mismatch: expected `int`, found `boolean`",
            )
            .and(predicate::str::contains("--> line 7"))
            .and(predicate::str::contains("Elaboration failed with 2 errors")),
        );
}

#[test]
fn unknown_strict_check_is_rejected() {
    elaborate("strict.json")
        .args(&["--strict-check", "everything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("strict-check"));
}

#[test]
fn class_table_can_be_dumped() {
    elaborate("well_typed.json")
        .arg("--dump-class-table")
        .assert()
        .success()
        .stderr(predicate::str::contains("method int get()"));
}

#[test]
fn timings_are_emitted_on_request() {
    elaborate("well_typed.json")
        .arg("--emit-timings")
        .assert()
        .success()
        .stderr(predicate::str::contains("elaboration: method bodies"));
}

#[test]
fn malformed_tree_is_a_tool_error() {
    elaborate("malformed.json")
        .assert()
        .failure()
        .code(1)
        .stderr(
            predicate::str::contains("error: cannot parse program tree in")
                .and(predicate::str::contains("caused by: missing field `line`")),
        );
}

#[test]
fn missing_input_is_a_tool_error() {
    elaborate("does_not_exist.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: cannot open input file"));
}
