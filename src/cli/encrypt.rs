//! Encrypt command.

use tracing::debug;

use crate::cli::{existing_files, finish_batch};
use crate::core::cipher::Encryptor;
use crate::core::config::Config;
use crate::core::files::{encrypt_file, run_batch};
use crate::core::store::Filesystem;
use crate::error::Result;

/// Encrypt selected values in each file.
///
/// Without `key`, each file must carry its own public key.
pub fn execute(files: Vec<String>, key: Option<&str>, encrypt_keys: &[String]) -> Result<()> {
    let config = Config::load()?;
    let selector = config.encrypt_selector(encrypt_keys)?;
    debug!(selector = %selector, "encrypting");

    let encryptor = match key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => Some(Encryptor::new(key)?),
        None => None,
    };

    let store = Filesystem;
    let paths = existing_files(&store, &config.files_or(files));
    let report = run_batch(&paths, |path| {
        encrypt_file(&store, path, encryptor.as_ref(), &selector)
    });

    finish_batch(report, "encrypt")
}
