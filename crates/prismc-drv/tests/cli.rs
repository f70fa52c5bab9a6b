//! End-to-end CLI tests: drive the built `prismc` binary against fixture
//! directories and assert on exit codes and file output.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn prismc() -> Command {
    Command::cargo_bin("prismc").unwrap()
}

#[test]
fn clean_program_exits_zero_and_writes_both_files() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("ok.prsm"), "int x = 1;\n").unwrap();
    let sink = tmp.path().join("symtab.prsm");

    prismc()
        .arg(tmp.path())
        .arg("--output")
        .arg(&sink)
        .arg("--non-interactive")
        .arg("0")
        .assert()
        .success();

    assert!(sink.exists());
    assert!(tmp.path().join("symtab_tree.prsm").exists());
}

#[test]
fn syntax_error_exits_one() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("bad.prsm"), "x = 1 y = 2;\n").unwrap();
    let sink = tmp.path().join("symtab.prsm");

    prismc()
        .arg(tmp.path())
        .arg("--output")
        .arg(&sink)
        .arg("--non-interactive")
        .arg("0")
        .assert()
        .code(1);
}

#[test]
fn empty_directory_exits_one_with_a_message() {
    let tmp = tempfile::tempdir().unwrap();

    prismc()
        .arg(tmp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no .prsm files"));
}

#[test]
fn out_of_range_selection_exits_one() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("ok.prsm"), "int x = 1;\n").unwrap();

    prismc()
        .arg(tmp.path())
        .arg("--non-interactive")
        .arg("5")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn parenthesized_format_flag_is_honored() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("ok.prsm"), "int x = 1;\n").unwrap();
    let sink = tmp.path().join("symtab.prsm");

    prismc()
        .arg(tmp.path())
        .arg("--output")
        .arg(&sink)
        .arg("--format")
        .arg("parenthesized")
        .arg("--non-interactive")
        .arg("0")
        .assert()
        .success();

    let rendered = fs::read_to_string(tmp.path().join("symtab_tree.prsm")).unwrap();
    assert!(rendered.trim_start().starts_with('('));
}

#[test]
fn interactive_prompt_reads_selection_from_stdin() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("ok.prsm"), "int x = 1;\n").unwrap();
    let sink = tmp.path().join("symtab.prsm");

    prismc()
        .arg(tmp.path())
        .arg("--output")
        .arg(&sink)
        .write_stdin("0\n")
        .assert()
        .success();

    assert!(sink.exists());
}
