//! Tests for `dotseal decrypt`.

use crate::support::*;

#[test]
fn test_encrypt_then_decrypt_restores_file() {
    let t = Test::with_file(".env", SAMPLE_ENV);

    assert_success(&t.encrypt(ALICE_PUB, &[]));
    assert_ne!(t.read(".env"), SAMPLE_ENV);

    let output = t.decrypt(ALICE_KEY, &[]);
    assert_success(&output);
    assert_stderr_contains(&output, ".env: 2 values decrypted");
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_decrypt_reference_envelopes() {
    let t = Test::with_file(
        ".env",
        &format!(
            "PASSWORD={}\nDATABASE_URL={}\n",
            fixture(HUNTER2_ENVELOPE),
            fixture(DSN_ENVELOPE)
        ),
    );

    assert_success(&t.decrypt(ALICE_KEY, &[]));
    assert_eq!(
        t.read(".env"),
        format!("PASSWORD=hunter2\nDATABASE_URL={}\n", DSN_PLAINTEXT)
    );
}

#[test]
fn test_decrypt_requires_key() {
    let t = Test::with_file(".env", &format!("A={}\n", fixture(HUNTER2_ENVELOPE)));

    let output = t.cmd().arg("decrypt").output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "No decryption key specified");
}

#[test]
fn test_decrypt_key_from_environment() {
    let t = Test::with_file(".env", &format!("A={}\n", fixture(HUNTER2_ENVELOPE)));

    let output = t
        .cmd()
        .arg("decrypt")
        .env("CONFIG_DECRYPTION_KEY", ALICE_KEY)
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.read(".env"), "A=hunter2\n");
}

#[test]
fn test_decrypt_wrong_key_leaves_file_untouched() {
    let content = format!("A={}\n", fixture(HUNTER2_ENVELOPE));
    let t = Test::with_file(".env", &content);

    let output = t.decrypt(BOB_KEY, &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
    assert_stderr_contains(&output, "1 of 1 files failed");
    assert_eq!(t.read(".env"), content);
}

#[test]
fn test_decrypt_unsupported_version() {
    let t = Test::with_file(".env", &format!("A={}\n", fixture(V2_ENVELOPE)));

    let output = t.decrypt(ALICE_KEY, &[]);
    assert_failure(&output);
    assert_stderr_contains(&output, "Unsupported encryption version: 2");
}

#[test]
fn test_decrypt_plain_file_is_noop() {
    let t = Test::with_file(".env", SAMPLE_ENV);

    let output = t.decrypt(ALICE_KEY, &[]);
    assert_success(&output);
    assert_stderr_contains(&output, "nothing to decrypt");
    assert_eq!(t.read(".env"), SAMPLE_ENV);
}

#[test]
fn test_decrypt_multiple_files() {
    let t = Test::new();
    t.write("a.env", &format!("A={}\n", fixture(HUNTER2_ENVELOPE)));
    t.write("b.env", &format!("B={}\n", fixture(DSN_ENVELOPE)));

    assert_success(&t.decrypt(ALICE_KEY, &["a.env", "b.env"]));
    assert_eq!(t.read("a.env"), "A=hunter2\n");
    assert_eq!(t.read("b.env"), format!("B={}\n", DSN_PLAINTEXT));
}
