//! Tests for `dotseal generate-keys`.

use crate::support::*;

fn parse_pair(out: &str) -> (String, String) {
    let public = env_value(out, "CONFIG_ENCRYPTION_KEY").expect("missing public key");
    let private = env_value(out, "CONFIG_DECRYPTION_KEY").expect("missing private key");
    (public.to_string(), private.to_string())
}

#[test]
fn test_generate_keys_output_format() {
    let t = Test::new();

    let output = t.generate_keys(&[]);
    assert_success(&output);

    let out = stdout(&output);
    assert_eq!(out.lines().count(), 2);
    let (public, private) = parse_pair(&out);
    assert!(!public.ends_with('='));
    assert!(!private.ends_with('='));
    assert_ne!(public, private);
}

#[test]
fn test_generated_keys_work_together() {
    let t = Test::with_file(".env", "API_SECRET=swordfish\n");

    let output = t.generate_keys(&[]);
    assert_success(&output);
    let (public, private) = parse_pair(&stdout(&output));

    assert_success(&t.encrypt(&public, &[]));
    assert_envelope(env_value(&t.read(".env"), "API_SECRET").unwrap());

    assert_success(&t.decrypt(&private, &[]));
    assert_eq!(t.read(".env"), "API_SECRET=swordfish\n");
}

#[test]
fn test_generate_keys_json() {
    let t = Test::new();

    let output = t.generate_keys(&["--json"]);
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(json["encryption_key"].as_str().unwrap().len() > 300);
    assert!(json["decryption_key"].as_str().unwrap().len() > 1500);
}
