//! Envelope crypto codec.
//!
//! Each value is encrypted on its own with a hybrid scheme: a fresh AES-256
//! key and IV encrypt the value in CBC mode, and the AES key is wrapped with
//! the recipient's RSA-2048 public key using OAEP (SHA-1, MGF1-SHA-1). The
//! result is written as a `$$[...]` envelope (see [`envelope`]).
//!
//! Holders of the public key can only encrypt; decryption needs the private key.
//!
//! ## Construction
//!
//! - [`Encryptor::new`] takes a base64 SPKI public key.
//! - [`Decryptor::new`] takes an optional base64 PKCS#8 private key. Without one
//!   the decryptor still exists, but every decrypt fails with
//!   `CipherError::MissingKey`.
//!
//! Both reject anything other than a 2048-bit key, since version 1 envelopes
//! have a fixed-width wrapped-key field.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use tracing::trace;
use zeroize::Zeroizing;

pub mod envelope;
pub mod keys;

pub use envelope::{is_envelope, Envelope};
pub use keys::{parse_private_key, parse_public_key, KeyPair};

use crate::core::types::EnvelopeText;
use crate::error::{CipherError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES-256 key length.
const SYMMETRIC_KEY_LEN: usize = 32;

/// Encrypts values for one public key.
#[derive(Debug, Clone)]
pub struct Encryptor {
    key: RsaPublicKey,
}

impl Encryptor {
    /// Build from base64 SPKI key text.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFormat` if the key is malformed or not 2048-bit.
    pub fn new(public_key: &str) -> Result<Self> {
        Ok(Self {
            key: parse_public_key(public_key)?,
        })
    }

    /// Build from an already parsed key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFormat` if the key is not 2048-bit.
    pub fn from_key(key: RsaPublicKey) -> Result<Self> {
        keys::check_size(key.size())?;
        Ok(Self { key })
    }

    /// Encrypt a value into a new envelope.
    ///
    /// Every call draws a fresh AES key and IV, so encrypting the same value
    /// twice gives different envelopes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the key wrap fails.
    pub fn encrypt(&self, plaintext: &str) -> Result<EnvelopeText> {
        trace!(plaintext_len = plaintext.len(), "encrypting");

        let mut key = Zeroizing::new([0u8; SYMMETRIC_KEY_LEN]);
        OsRng.fill_bytes(&mut key[..]);
        let mut iv = [0u8; envelope::IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let wrapped_key = self
            .key
            .encrypt(&mut OsRng, Oaep::new::<Sha1>(), &key[..])
            .map_err(|e| CipherError::EncryptionFailed(format!("key wrap failed: {}", e)))?;

        let ciphertext = Aes256CbcEnc::new_from_slices(&key[..], &iv)
            .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

        let sealed = Envelope {
            wrapped_key,
            iv,
            ciphertext,
        }
        .seal();

        trace!(envelope_len = sealed.len(), "encrypted");
        Ok(sealed)
    }

    /// Encrypt unless the value already has envelope shape.
    ///
    /// Idempotent: applying it twice gives the same string as applying it once.
    pub fn encrypt_if_not_envelope(&self, value: &str) -> Result<String> {
        if is_envelope(value) {
            return Ok(value.to_string());
        }
        self.encrypt(value)
    }
}

/// Decrypts envelopes with an optional private key.
#[derive(Clone)]
pub struct Decryptor {
    key: Option<RsaPrivateKey>,
}

impl Decryptor {
    /// Build from optional base64 PKCS#8 key text.
    ///
    /// `None`, an empty string, or whitespace gives a decryptor with no key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFormat` if a key is given but malformed.
    pub fn new(private_key: Option<&str>) -> Result<Self> {
        let key = match private_key.map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_private_key(text)?),
            _ => None,
        };
        Ok(Self { key })
    }

    /// A decryptor that fails every decrypt with `CipherError::MissingKey`.
    pub fn without_key() -> Self {
        Self { key: None }
    }

    /// Build from an already parsed key.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::KeyFormat` if the key is not 2048-bit.
    pub fn from_key(key: RsaPrivateKey) -> Result<Self> {
        keys::check_size(key.size())?;
        Ok(Self { key: Some(key) })
    }

    /// Whether a private key is present.
    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }

    /// Decrypt an envelope.
    ///
    /// # Errors
    ///
    /// - `CipherError::MissingKey` if built without a key (checked first)
    /// - `CipherError::UnsupportedVersion` for unknown version bytes
    /// - `CipherError::DecryptionFailed` for wrong keys, corruption or tampering
    pub fn decrypt(&self, value: &str) -> Result<String> {
        let private = self.key.as_ref().ok_or(CipherError::MissingKey)?;

        trace!(envelope_len = value.len(), "decrypting");
        let envelope = Envelope::parse(value)?;

        let key = Zeroizing::new(
            private
                .decrypt_blinded(&mut OsRng, Oaep::new::<Sha1>(), &envelope.wrapped_key)
                .map_err(|e| CipherError::DecryptionFailed(format!("key unwrap failed: {}", e)))?,
        );

        let plaintext = Aes256CbcDec::new_from_slices(&key[..], &envelope.iv)
            .map_err(|e| CipherError::DecryptionFailed(format!("unwrapped key unusable: {}", e)))?
            .decrypt_padded_vec_mut::<Pkcs7>(&envelope.ciphertext)
            .map_err(|_| CipherError::DecryptionFailed("invalid padding".to_string()))?;

        trace!(plaintext_len = plaintext.len(), "decrypted");

        String::from_utf8(plaintext)
            .map_err(|e| CipherError::DecryptionFailed(format!("UTF-8 error: {}", e)).into())
    }

    /// Decrypt if the value has envelope shape, otherwise return it unchanged.
    pub fn decrypt_if_envelope(&self, value: &str) -> Result<String> {
        if is_envelope(value) {
            return self.decrypt(value);
        }
        Ok(value.to_string())
    }
}

impl std::fmt::Debug for Decryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decryptor")
            .field("has_key", &self.has_key())
            .finish()
    }
}

/// Encrypt one value for a base64 public key.
///
/// # Errors
///
/// Returns `CipherError::KeyFormat` for a bad key, or any error from [`Encryptor::encrypt`].
pub fn encrypt(plaintext: &str, public_key: &str) -> Result<EnvelopeText> {
    Encryptor::new(public_key)?.encrypt(plaintext)
}

/// Decrypt one envelope with a base64 private key.
///
/// # Errors
///
/// Returns `CipherError::MissingKey` for an empty key, `CipherError::KeyFormat`
/// for a bad key, or any error from [`Decryptor::decrypt`].
pub fn decrypt(envelope: &str, private_key: &str) -> Result<String> {
    Decryptor::new(Some(private_key))?.decrypt(envelope)
}
