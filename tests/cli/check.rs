//! Tests for `dotseal check`.

use crate::support::*;

#[test]
fn test_check_reports_plaintext_secrets() {
    let t = Test::with_file(".env", SAMPLE_ENV);

    let output = t.check(&[]);
    assert_failure(&output);
    assert_stdout_contains(&output, "VAR_3_SECRET");
    assert_stdout_contains(&output, "VAR_5_SECRET");
    assert_stdout_excludes(&output, "VAR_1");
    assert_stderr_contains(&output, "2 unencrypted secrets found");
}

#[test]
fn test_check_passes_after_encrypt() {
    let t = Test::with_file(".env", SAMPLE_ENV);
    assert_success(&t.encrypt(ALICE_PUB, &[]));

    let output = t.check(&[]);
    assert_success(&output);
    assert_stderr_contains(&output, "all secrets encrypted");
}

#[test]
fn test_check_custom_patterns() {
    let t = Test::with_file(".env", SAMPLE_ENV);

    let output = t.check(&["-e", "/^VAR_4$/"]);
    assert_failure(&output);
    assert_stdout_contains(&output, "VAR_4");
    assert_stdout_excludes(&output, "VAR_3_SECRET");
    assert_stderr_contains(&output, "1 unencrypted secret found");
}

#[test]
fn test_check_takes_several_patterns_per_flag() {
    let t = Test::with_file(".env", SAMPLE_ENV);

    let output = t.check(&[".env", "-e", "VAR_1", "VAR_4"]);
    assert_failure(&output);
    assert_stdout_contains(&output, "VAR_1");
    assert_stdout_contains(&output, "VAR_4");
    assert_stdout_excludes(&output, "VAR_3_SECRET");
    assert_stderr_contains(&output, "2 unencrypted secrets found");
}

#[test]
fn test_check_status_stays_off_stdout() {
    let t = Test::with_file(".env", "A=1
");

    let output = t.check(&[]);
    assert_success(&output);
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_check_json() {
    let t = Test::with_file(".env", "A_SECRET=x\nB=y\n");

    let output = t.check(&["--json"]);
    assert_failure(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json[0]["path"], ".env");
    assert_eq!(json[0]["keys"][0], "A_SECRET");
}

#[test]
fn test_check_invalid_regex() {
    let t = Test::with_file(".env", "A=1\n");

    let output = t.check(&["-e", "/([/"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "([");
}
