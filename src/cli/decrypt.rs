//! Decrypt command.

use crate::cli::{existing_files, finish_batch};
use crate::core::cipher::Decryptor;
use crate::core::config::Config;
use crate::core::files::{decrypt_file, run_batch};
use crate::core::store::Filesystem;
use crate::error::{ConfigError, Result};

/// Decrypt every envelope in each file.
pub fn execute(files: Vec<String>, key: Option<&str>) -> Result<()> {
    let key = key
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .ok_or(ConfigError::NoDecryptionKey)?;
    let decryptor = Decryptor::new(Some(key))?;

    let config = Config::load()?;
    let store = Filesystem;
    let paths = existing_files(&store, &config.files_or(files));
    let report = run_batch(&paths, |path| decrypt_file(&store, path, &decryptor));

    finish_batch(report, "decrypt")
}
