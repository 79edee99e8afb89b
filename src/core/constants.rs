//! Constants used throughout dotseal.
//!
//! Centralizes magic strings and configuration values.

/// Project configuration file name (.dotseal.toml).
pub const CONFIG_FILE: &str = ".dotseal.toml";

/// Default environment variables file name (.env).
pub const ENV_FILE: &str = ".env";

/// Environment variable holding the base64 public key used by `encrypt`.
pub const ENCRYPTION_KEY_VAR: &str = "CONFIG_ENCRYPTION_KEY";

/// Environment variable holding the base64 private key used by `decrypt`.
pub const DECRYPTION_KEY_VAR: &str = "CONFIG_DECRYPTION_KEY";

/// Assignment names that may carry the public key inside the file being encrypted.
pub const IN_FILE_KEY_NAMES: &[&str] = &[ENCRYPTION_KEY_VAR, "__CONFIG_ENCRYPTION_KEY__"];

/// Environment variable selecting the environment name for `shenv`.
pub const APP_ENV_VAR: &str = "APP_ENV";

/// Fallback environment selector; only `development` is honoured.
pub const NODE_ENV_VAR: &str = "NODE_ENV";

/// Default key selection for `encrypt`: keys ending in `_SECRET`.
pub const DEFAULT_ENCRYPT_PATTERN: &str = "/_SECRET$/";

/// Envelope text prefix.
pub const ENVELOPE_PREFIX: &str = "$$[";

/// Envelope text suffix.
pub const ENVELOPE_SUFFIX: &str = "]";

/// RSA modulus size for generated and accepted keys.
pub const RSA_BITS: usize = 2048;
