//! Test fixtures and constants.
//!
//! Keys are RSA-2048, base64 without padding. The envelopes were produced by
//! an independent implementation of the v1 format.

/// Public key (SPKI) of the primary test pair.
pub const ALICE_PUB: &str = include_str!("../fixtures/alice.pub");

/// Private key (PKCS#8) of the primary test pair.
pub const ALICE_KEY: &str = include_str!("../fixtures/alice.key");

/// Public key of an unrelated pair.
pub const BOB_PUB: &str = include_str!("../fixtures/bob.pub");

/// Private key of an unrelated pair.
pub const BOB_KEY: &str = include_str!("../fixtures/bob.key");

/// A well-formed public key that is only 1024 bits.
pub const RSA1024_PUB: &str = include_str!("../fixtures/rsa1024.pub");

/// Envelope of `hunter2` for alice.
pub const HUNTER2_ENVELOPE: &str = include_str!("../fixtures/hunter2.v1.envelope");

/// Envelope of [`DSN_PLAINTEXT`] for alice.
pub const DSN_ENVELOPE: &str = include_str!("../fixtures/dsn.v1.envelope");

/// Plaintext of [`DSN_ENVELOPE`].
pub const DSN_PLAINTEXT: &str = "postgres://user:p@ss=word@db:5432/app";

/// An envelope whose version byte is 2.
pub const V2_ENVELOPE: &str = include_str!("../fixtures/hunter2.v2.envelope");

/// A .env file with comments, blank lines and a non-assignment.
pub const SAMPLE_ENV: &str = include_str!("../fixtures/sample.env");

/// Trimmed fixture text.
pub fn fixture(text: &str) -> &str {
    text.trim()
}
