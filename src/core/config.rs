//! Project configuration.
//!
//! Reads the optional `.dotseal.toml` in the current directory. Every field
//! is optional; command-line flags and environment variables take precedence.
//!
//! ```toml
//! files = [".env", ".env.production"]
//!
//! [encrypt]
//! keys = ["/_SECRET$/", "API_TOKEN"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::constants;
use crate::core::pattern::KeySelector;
use crate::core::store::{Filesystem, Store};
use crate::error::{ConfigError, Result};

/// Contents of `.dotseal.toml`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Files used when a command is given none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,

    /// Settings for `encrypt`.
    #[serde(default)]
    pub encrypt: EncryptConfig,
}

/// `[encrypt]` section.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncryptConfig {
    /// Key patterns to encrypt; `/regex/` or exact names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<String>>,
}

impl Config {
    /// Path to the configuration file in the current directory.
    pub fn config_path() -> PathBuf {
        PathBuf::from(constants::CONFIG_FILE)
    }

    /// Load `.dotseal.toml` from the current directory, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns a read error or `ConfigError::Parse` if the file exists but
    /// cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Filesystem, &Self::config_path())
    }

    /// Load from `path` in `store`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns a read error from the store or `ConfigError::Parse`.
    pub fn load_from(store: &dyn Store, path: &Path) -> Result<Self> {
        if !store.exists(path) {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = store.read_text(path)?;
        let config = Self::parse(&contents)?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown fields.
    pub fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e).into())
    }

    /// Files to operate on: `cli` if non-empty, else configured, else `.env`.
    pub fn files_or(&self, cli: Vec<String>) -> Vec<String> {
        if !cli.is_empty() {
            return cli;
        }
        self.files
            .clone()
            .filter(|files| !files.is_empty())
            .unwrap_or_else(|| vec![constants::ENV_FILE.to_string()])
    }

    /// Key selector for `encrypt`: `cli` patterns if any, else configured,
    /// else the default (keys ending in `_SECRET`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` for a bad regular expression.
    pub fn encrypt_selector(&self, cli: &[String]) -> Result<KeySelector> {
        if !cli.is_empty() {
            return KeySelector::parse(cli);
        }
        match &self.encrypt.keys {
            Some(keys) => KeySelector::parse(keys),
            None => Ok(KeySelector::default()),
        }
    }
}
