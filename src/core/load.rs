//! Loading .env files into an environment.
//!
//! Files are read in order, parsed, envelopes decrypted, and the results
//! merged with later files overriding earlier ones. Variables already present in the
//! environment always win over file values.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::cipher::Decryptor;
use crate::core::constants::{APP_ENV_VAR, ENV_FILE, NODE_ENV_VAR};
use crate::core::dotenv;
use crate::core::env::Document;
use crate::core::store::Store;
use crate::core::types::ConfigMap;
use crate::error::Result;

/// A set of environment variables that values can be loaded into.
pub trait Environment {
    /// Current value of a variable.
    fn get(&self, key: &str) -> Option<String>;

    /// Set every variable in `values` in one step.
    fn apply(&mut self, values: &ConfigMap);
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn apply(&mut self, values: &ConfigMap) {
        for (key, value) in values {
            // set_var panics on these
            if key.is_empty() || key.contains(['=', '\0']) || value.contains('\0') {
                warn!(key = %key, "skipping variable that cannot be set");
                continue;
            }
            std::env::set_var(key, value);
        }
    }
}

/// An environment held in a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: ConfigMap,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style set.
    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    pub fn vars(&self) -> &ConfigMap {
        &self.vars
    }
}

impl Environment for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }

    fn apply(&mut self, values: &ConfigMap) {
        self.vars
            .extend(values.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

/// Options for [`load`].
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Files to read, in override order. Missing files are skipped.
    pub files: Vec<PathBuf>,
    /// Private key for decrypting envelopes.
    pub key: Option<String>,
}

impl LoadOptions {
    /// Options for the conventional file chain of an environment.
    pub fn for_environment(name: Option<&str>, key: Option<String>) -> Self {
        Self {
            files: env_files(name),
            key,
        }
    }
}

/// The file chain for an environment name.
///
/// `.env`, `.env.local`, then `.env.<name>` and `.env.<name>.local` when a
/// name is given.
pub fn env_files(name: Option<&str>) -> Vec<PathBuf> {
    let mut files = vec![PathBuf::from(ENV_FILE), PathBuf::from(format!("{ENV_FILE}.local"))];
    if let Some(name) = name.filter(|n| !n.is_empty()) {
        files.push(PathBuf::from(format!("{ENV_FILE}.{name}")));
        files.push(PathBuf::from(format!("{ENV_FILE}.{name}.local")));
    }
    files
}

/// Name of the current environment.
///
/// `APP_ENV` if set, else `development` when `NODE_ENV=development`.
pub fn environment_name(env: &dyn Environment) -> Option<String> {
    if let Some(name) = env.get(APP_ENV_VAR).filter(|n| !n.is_empty()) {
        return Some(name);
    }
    env.get(NODE_ENV_VAR).filter(|n| n == "development")
}

/// How file text is interpreted when reading values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    /// dotenv rules: quotes stripped, comments dropped, no substitution.
    #[default]
    Dotenv,
    /// The text after the first `=`, exactly as written.
    Raw,
}

/// Read one file, parse it and decrypt every envelope value.
///
/// Parsing happens before decryption, so decrypted values reach the caller
/// byte for byte.
///
/// # Errors
///
/// Returns read errors or codec errors for envelopes.
pub fn read_file(
    store: &dyn Store,
    path: &Path,
    decryptor: &Decryptor,
    syntax: Syntax,
) -> Result<ConfigMap> {
    let content = store.read_text(path)?;
    let parsed = match syntax {
        Syntax::Dotenv => dotenv::parse(&content),
        Syntax::Raw => Document::parse(&content).to_map(),
    };

    parsed
        .into_iter()
        .map(|(key, value)| {
            let value = decryptor.decrypt_if_envelope(&value)?;
            Ok((key, value))
        })
        .collect()
}

/// Read and merge `files`, skipping those that don't exist.
///
/// # Errors
///
/// Returns the first error from [`read_file`].
pub fn read_files(
    store: &dyn Store,
    files: &[PathBuf],
    decryptor: &Decryptor,
    syntax: Syntax,
) -> Result<ConfigMap> {
    let mut merged = ConfigMap::new();

    for path in files {
        if !store.exists(path) {
            debug!(path = %path.display(), "skipping missing file");
            continue;
        }
        let values = read_file(store, path, decryptor, syntax)?;
        debug!(path = %path.display(), count = values.len(), "loaded file");
        merged.extend(values);
    }
    Ok(merged)
}

/// Load files into `env`.
///
/// Returns every file-defined variable with its effective value: the
/// existing environment value if there is one, else the file value. Only
/// variables not already set are written to `env`.
///
/// # Errors
///
/// Returns `CipherError::KeyFormat` for a bad key, or any error from
/// [`read_files`]. `env` is untouched on error.
pub fn load(store: &dyn Store, options: &LoadOptions, env: &mut dyn Environment) -> Result<ConfigMap> {
    let decryptor = Decryptor::new(options.key.as_deref())?;
    let values = read_files(store, &options.files, &decryptor, Syntax::Dotenv)?;

    let mut resolved = ConfigMap::new();
    let mut missing = ConfigMap::new();
    for (key, value) in values {
        match env.get(&key) {
            Some(existing) => {
                resolved.insert(key, existing);
            }
            None => {
                missing.insert(key.clone(), value.clone());
                resolved.insert(key, value);
            }
        }
    }

    env.apply(&missing);
    debug!(total = resolved.len(), set = missing.len(), "environment loaded");
    Ok(resolved)
}

/// Quote a value for a double-quoted POSIX shell string.
fn shell_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// `export KEY="value"` lines for variables not already set in `env`.
///
/// A variable set to the empty string counts as unset.
pub fn shell_exports(values: &ConfigMap, env: &dyn Environment) -> String {
    values
        .iter()
        .filter(|(key, _)| env.get(key).map_or(true, |v| v.is_empty()))
        .map(|(key, value)| format!("export {}={}\n", key, shell_quote(value)))
        .collect()
}
