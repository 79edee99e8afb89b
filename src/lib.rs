//! Dotseal - encrypt secrets inside .env files so they can be committed.
//!
//! Selected values are replaced in place by `$$[...]` envelopes: a random
//! AES-256-CBC key wrapped with RSA-OAEP for a 2048-bit public key. Anyone
//! with the public key can encrypt; only the private key decrypts.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── encrypt       # Encrypt selected values in place
//! │   ├── decrypt       # Decrypt envelopes in place
//! │   ├── sh            # Print shell exports
//! │   ├── generate_keys # Create a key pair
//! │   ├── check         # Find unencrypted secrets
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── cipher/       # Envelope codec
//!     │   ├── envelope  # Envelope text format
//!     │   └── keys      # RSA key parsing and generation
//!     ├── env           # Line-preserving .env transform
//!     ├── pattern       # Key selection patterns
//!     ├── store/        # File storage
//!     ├── files         # Per-file encrypt/decrypt and batches
//!     ├── load          # Loading files into an environment
//!     └── config        # .dotseal.toml
//! ```
//!
//! # Example
//!
//! ```no_run
//! use dotseal::core::cipher::{Decryptor, Encryptor, KeyPair};
//!
//! let keys = KeyPair::generate()?;
//! let sealed = Encryptor::new(keys.public_key())?.encrypt("hunter2")?;
//! let opened = Decryptor::new(Some(keys.private_key()))?.decrypt(&sealed)?;
//! assert_eq!(opened, "hunter2");
//! # Ok::<(), dotseal::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
