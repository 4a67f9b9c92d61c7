//! End-to-end CLI tests: each one spawns the built `glint` binary and
//! checks its observable behavior, mirroring `faxc-drv/tests/e2e`'s use
//! of `assert_cmd` to drive a real process rather than calling library
//! functions directly.

use assert_cmd::Command;
use predicates::prelude::*;

fn glint() -> Command {
    Command::cargo_bin("glint").unwrap()
}

#[test]
fn help_flag_exits_successfully() {
    glint()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("glint"));
}

#[test]
fn version_flag_exits_successfully() {
    glint().arg("--version").assert().success();
}

#[test]
fn test_mode_runs_the_built_in_suite_and_exits_zero() {
    glint()
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("passed"));
}

#[test]
fn evaluating_a_file_prints_the_sink_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.glint");
    std::fs::write(&path, r#"lambda main(){ print("hi"); }"#).unwrap();

    glint()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq("hi"));
}

#[test]
fn a_missing_file_fails_with_a_diagnostic_on_stderr() {
    glint()
        .arg("does-not-exist.glint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("[glint."));
}

#[test]
fn a_runtime_error_in_a_file_fails_nonzero_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.glint");
    std::fs::write(&path, "lambda main(){ x; }").unwrap();

    glint()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("[glint.eval]"));
}

#[test]
fn load_directive_resolves_relative_to_the_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("lib.glint"),
        "lambda helper(){ print(\"from-lib\"); }",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("main.glint"),
        "load \"lib.glint\"; lambda main(){ helper(); }",
    )
    .unwrap();

    glint()
        .current_dir(dir.path())
        .arg("main.glint")
        .assert()
        .success()
        .stdout(predicate::eq("from-lib"));
}

#[test]
fn repl_echoes_each_lines_sink_output() {
    glint()
        .write_stdin("lambda main(){print(1+1);}\nlambda main(){print(2+2);}\n")
        .assert()
        .success()
        .stdout(predicate::eq("2\n4\n"));
}
