use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn compiles_a_global_binding_to_an_s_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("program.lisp");
    fs::write(&input, "(define z (+ 5 10))").unwrap();

    Command::cargo_bin("tlc")
        .unwrap()
        .arg("compile")
        .arg(&input)
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("program.s")).unwrap();
    assert!(output.contains("global main"));
    assert!(output.contains("G_z: dq 0"));
}

#[test]
fn missing_input_file_exits_non_zero() {
    Command::cargo_bin("tlc")
        .unwrap()
        .arg("compile")
        .arg("/no/such/file.lisp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn arity_error_exits_non_zero_with_diagnostic() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad.lisp");
    fs::write(&input, "(+ 1)").unwrap();

    Command::cargo_bin("tlc")
        .unwrap()
        .arg("compile")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires 2 arguments"));
}

#[test]
fn unterminated_string_exits_non_zero() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("bad_string.lisp");
    fs::write(&input, "\"abc").unwrap();

    Command::cargo_bin("tlc")
        .unwrap()
        .arg("compile")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unterminated string literal"));
}
