//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

use std::collections::BTreeMap;

/// An assignment key as written in the file (e.g., DATABASE_URL).
///
/// Kept verbatim, including any surrounding whitespace before the `=`.
pub type EnvKey = String;

/// An assignment value: plaintext or envelope text.
pub type EnvValue = String;

/// The key → value mapping handed to a transform callback.
///
/// Keys are unique; ordering carries no meaning.
pub type ConfigMap = BTreeMap<EnvKey, EnvValue>;

/// A `$$[...]` encrypted value.
pub type EnvelopeText = String;

/// Base64 DER key material (SPKI public or PKCS#8 private), padding stripped.
pub type KeyText = String;
