//! Key material parsing and generation.
//!
//! Public keys travel as base64 SubjectPublicKeyInfo DER, private keys as
//! base64 PKCS#8 DER, both with trailing `=` padding stripped.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use rand::rngs::OsRng;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::debug;
use zeroize::Zeroizing;

use super::envelope::WRAPPED_KEY_LEN;
use crate::core::constants::RSA_BITS;
use crate::core::types::KeyText;
use crate::error::{CipherError, Result};

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// Standard alphabet, never pads on encode, accepts padded or unpadded input.
pub(crate) const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

/// URL-safe alphabet with the same padding rules.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// Decode base64 in either alphabet, with or without padding.
pub(crate) fn decode_base64(text: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    STANDARD_LENIENT
        .decode(text)
        .or_else(|_| URL_SAFE_LENIENT.decode(text))
}

/// Parse a base64 SPKI public key.
///
/// # Errors
///
/// Returns `CipherError::KeyFormat` if the text is not base64, not an RSA
/// SubjectPublicKeyInfo structure, or not a 2048-bit key.
pub fn parse_public_key(text: &str) -> Result<RsaPublicKey> {
    let der = decode_base64(text.trim())
        .map_err(|e| CipherError::KeyFormat(format!("public key is not valid base64: {}", e)))?;

    let key = RsaPublicKey::from_public_key_der(&der)
        .map_err(|e| CipherError::KeyFormat(format!("not an RSA public key: {}", e)))?;

    check_size(key.size())?;
    Ok(key)
}

/// Parse a base64 PKCS#8 private key.
///
/// # Errors
///
/// Returns `CipherError::KeyFormat` if the text is not base64, not an RSA
/// PKCS#8 structure, or not a 2048-bit key.
pub fn parse_private_key(text: &str) -> Result<RsaPrivateKey> {
    let der = Zeroizing::new(
        decode_base64(text.trim()).map_err(|e| {
            CipherError::KeyFormat(format!("private key is not valid base64: {}", e))
        })?,
    );

    let key = RsaPrivateKey::from_pkcs8_der(&der)
        .map_err(|e| CipherError::KeyFormat(format!("not an RSA private key: {}", e)))?;

    check_size(key.size())?;
    Ok(key)
}

/// Version 1 envelopes carry a fixed-width wrapped key, so only one modulus size fits.
pub(crate) fn check_size(modulus_bytes: usize) -> Result<()> {
    if modulus_bytes != WRAPPED_KEY_LEN {
        return Err(CipherError::KeyFormat(format!(
            "expected a {}-bit RSA key, got {} bits",
            RSA_BITS,
            modulus_bytes * 8
        ))
        .into());
    }
    Ok(())
}

/// A freshly generated key pair in transport encoding.
pub struct KeyPair {
    public: KeyText,
    private: Zeroizing<KeyText>,
}

impl KeyPair {
    /// Generate a new RSA-2048 key pair.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyGeneration` if generation or DER encoding fails.
    pub fn generate() -> Result<Self> {
        debug!(bits = RSA_BITS, "generating key pair");

        let private = RsaPrivateKey::new(&mut OsRng, RSA_BITS)
            .map_err(|e| CipherError::KeyGeneration(e.to_string()))?;

        let public_der = private
            .to_public_key()
            .to_public_key_der()
            .map_err(|e| CipherError::KeyGeneration(e.to_string()))?;
        let private_der = private
            .to_pkcs8_der()
            .map_err(|e| CipherError::KeyGeneration(e.to_string()))?;

        Ok(Self {
            public: STANDARD_LENIENT.encode(public_der.as_bytes()),
            private: Zeroizing::new(STANDARD_LENIENT.encode(private_der.as_bytes())),
        })
    }

    /// Base64 SPKI public key (the encryption key).
    pub fn public_key(&self) -> &str {
        &self.public
    }

    /// Base64 PKCS#8 private key (the decryption key).
    pub fn private_key(&self) -> &str {
        &self.private
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .finish()
    }
}
