//! Envelope wire format.
//!
//! An envelope is `$$[<base64>]` where the decoded bytes are:
//!
//! ```text
//! offset  length    field
//! 0       1         format version (1)
//! 1       256       RSA-OAEP wrapped AES key
//! 257     16        AES-CBC initialization vector
//! 273     variable  AES-256-CBC ciphertext (PKCS#7 padded)
//! ```
//!
//! Base64 is written with the standard alphabet and no padding. Decoding
//! also accepts padded and URL-safe input.

use base64::Engine;

use super::keys::{decode_base64, STANDARD_LENIENT};
use crate::core::constants::{ENVELOPE_PREFIX, ENVELOPE_SUFFIX};
use crate::core::types::EnvelopeText;
use crate::error::{CipherError, Result};

/// The only defined format version.
pub const VERSION: u8 = 1;

/// Wrapped key width for a 2048-bit modulus.
pub const WRAPPED_KEY_LEN: usize = 256;

/// AES block-sized IV.
pub const IV_LEN: usize = 16;

const HEADER_LEN: usize = 1 + WRAPPED_KEY_LEN + IV_LEN;

/// Shape check: starts with `$$[` and ends with `]`.
///
/// Anything else is plaintext by definition. This does not validate the
/// payload; a value can have envelope shape and still fail to decrypt.
pub fn is_envelope(value: &str) -> bool {
    value.starts_with(ENVELOPE_PREFIX) && value.ends_with(ENVELOPE_SUFFIX)
}

/// Decoded fields of a version 1 envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub wrapped_key: Vec<u8>,
    pub iv: [u8; IV_LEN],
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Serialize to `$$[...]` text.
    pub fn seal(&self) -> EnvelopeText {
        let mut bytes =
            Vec::with_capacity(1 + self.wrapped_key.len() + IV_LEN + self.ciphertext.len());
        bytes.push(VERSION);
        bytes.extend_from_slice(&self.wrapped_key);
        bytes.extend_from_slice(&self.iv);
        bytes.extend_from_slice(&self.ciphertext);

        format!(
            "{}{}{}",
            ENVELOPE_PREFIX,
            STANDARD_LENIENT.encode(&bytes),
            ENVELOPE_SUFFIX
        )
    }

    /// Parse `$$[...]` text into its fields.
    ///
    /// # Errors
    ///
    /// - `CipherError::UnsupportedVersion` if the version byte is not 1
    /// - `CipherError::DecryptionFailed` if the text is not an envelope, the
    ///   payload is not base64, or it is too short to hold the header
    pub fn parse(text: &str) -> Result<Self> {
        let encoded = text
            .strip_prefix(ENVELOPE_PREFIX)
            .and_then(|rest| rest.strip_suffix(ENVELOPE_SUFFIX))
            .ok_or_else(|| CipherError::DecryptionFailed("value is not an envelope".to_string()))?;

        let bytes = decode_base64(encoded)
            .map_err(|e| CipherError::DecryptionFailed(format!("invalid base64: {}", e)))?;

        let version = *bytes
            .first()
            .ok_or_else(|| CipherError::DecryptionFailed("empty envelope".to_string()))?;
        if version != VERSION {
            return Err(CipherError::UnsupportedVersion(version).into());
        }

        if bytes.len() < HEADER_LEN {
            return Err(CipherError::DecryptionFailed(format!(
                "envelope truncated: {} bytes, need at least {}",
                bytes.len(),
                HEADER_LEN
            ))
            .into());
        }

        let mut iv = [0u8; IV_LEN];
        iv.copy_from_slice(&bytes[1 + WRAPPED_KEY_LEN..HEADER_LEN]);

        Ok(Self {
            wrapped_key: bytes[1..1 + WRAPPED_KEY_LEN].to_vec(),
            iv,
            ciphertext: bytes[HEADER_LEN..].to_vec(),
        })
    }
}
