//! Error types.
//!
//! Each concern has its own error enum; [`Error`] wraps them all so callers
//! can propagate with `?` and still match on the specific failure.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    File(#[from] FileError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Envelope codec failures.
#[derive(Error, Debug)]
pub enum CipherError {
    /// Key material could not be parsed as the expected encoding or type.
    #[error("invalid key: {0}")]
    KeyFormat(String),

    /// A decrypt was attempted on a decryptor built without a private key.
    #[error("No decryption key was provided")]
    MissingKey,

    /// The envelope version byte is not one we know how to read.
    #[error("Unsupported encryption version: {0}")]
    UnsupportedVersion(u8),

    /// Key unwrap or payload decryption failed (wrong key, corruption, tampering).
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("key generation failed: {0}")]
    KeyGeneration(String),
}

/// Line transform failures.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The transform callback dropped a key that was present in its input.
    #[error("transform result is missing key: {0}")]
    MissingKey(String),
}

/// Key resolution and project configuration failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No encryption key specified for {file}")]
    NoEncryptionKey { file: String },

    #[error("No decryption key specified")]
    NoDecryptionKey,

    #[error("invalid key pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// File and batch failures.
#[derive(Error, Debug)]
pub enum FileError {
    #[error("'{}' does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Aggregate failure of a multi-file operation.
    #[error("{failed} of {total} files failed")]
    Batch { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
