//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    let output = t.cmd().arg("--help").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypt");
    assert_stdout_contains(&output, "generate-keys");
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    let output = t.cmd().arg("--version").output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "dotseal");
}

#[test]
fn test_verbose_flag_accepted() {
    let t = Test::with_file(".env", "A_SECRET=1\n");

    let output = t
        .cmd()
        .args(["--verbose", "encrypt", "-k", ALICE_PUB])
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_malformed_key_fails() {
    let t = Test::with_file(".env", "A_SECRET=1\n");

    let output = t.encrypt("not-a-key", &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid key");
}

#[test]
fn test_missing_key_hint() {
    let t = Test::with_file(".env", "A=1\n");

    t.cmd()
        .arg("decrypt")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(
            predicate::str::contains("No decryption key specified")
                .and(predicate::str::contains("CONFIG_DECRYPTION_KEY")),
        );
}

#[test]
fn test_missing_encryption_key_hint() {
    let t = Test::with_file(".env", "A_SECRET=1\n");

    t.cmd()
        .arg("encrypt")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dotseal generate-keys"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "_dotseal");
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "zsh"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "#compdef dotseal");
}

#[test]
fn test_completions_fish() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "fish"]).output().unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "complete -c dotseal");
}
