//! File-level encrypt/decrypt.
//!
//! Each file is read, transformed in memory and written back only if the
//! whole transform succeeded. Batches keep going after a failed file and
//! report every outcome.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::cipher::{is_envelope, Decryptor, Encryptor};
use crate::core::constants::IN_FILE_KEY_NAMES;
use crate::core::env::Document;
use crate::core::pattern::KeySelector;
use crate::core::store::Store;
use crate::core::types::ConfigMap;
use crate::error::{ConfigError, Error, FileError, Result};

/// Split `files` into those that exist and those that don't, keeping order.
pub fn partition_existing(store: &dyn Store, files: &[String]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    files
        .iter()
        .map(PathBuf::from)
        .partition(|path| store.exists(path))
}

/// Read, transform and write one file.
///
/// `f` maps the file's assignments to their new values. Nothing is written
/// when no value changed.
///
/// Returns the number of assignment lines whose value changed.
///
/// # Errors
///
/// Returns any error from reading, from `f`, from the line transform, or
/// from writing.
pub fn transform_file<F>(store: &dyn Store, path: &Path, f: F) -> Result<usize>
where
    F: FnOnce(ConfigMap) -> Result<ConfigMap>,
{
    let content = store.read_text(path)?;
    let mut document = Document::parse(&content);

    let transformed = f(document.to_map())?;
    let changed = document.apply(&transformed)?;

    if changed > 0 {
        store.write_text(path, &document.render())?;
    }

    debug!(path = %path.display(), lines = document.len(), changed, "file transformed");
    Ok(changed)
}

/// Encrypt the values of selected keys in one file.
///
/// With no `encryptor`, the public key is taken from the file itself
/// (`CONFIG_ENCRYPTION_KEY` or `__CONFIG_ENCRYPTION_KEY__`). Values that
/// are already envelopes are left alone.
///
/// # Errors
///
/// - `ConfigError::NoEncryptionKey` if no key is given or found in the file
/// - `CipherError::KeyFormat` if the in-file key is malformed
pub fn encrypt_file(
    store: &dyn Store,
    path: &Path,
    encryptor: Option<&Encryptor>,
    selector: &KeySelector,
) -> Result<usize> {
    transform_file(store, path, |mut map| {
        let in_file;
        let encryptor = match encryptor {
            Some(encryptor) => encryptor,
            None => {
                let key = IN_FILE_KEY_NAMES
                    .iter()
                    .find_map(|name| map.get(*name))
                    .ok_or_else(|| ConfigError::NoEncryptionKey {
                        file: path.display().to_string(),
                    })?;
                debug!(path = %path.display(), "using encryption key from file");
                in_file = Encryptor::new(key)?;
                &in_file
            }
        };

        for (key, value) in map.iter_mut() {
            if selector.matches(key) {
                *value = encryptor.encrypt_if_not_envelope(value)?;
            }
        }
        Ok(map)
    })
}

/// Decrypt every envelope in one file.
///
/// # Errors
///
/// Returns the first codec error; the file is not written in that case.
pub fn decrypt_file(store: &dyn Store, path: &Path, decryptor: &Decryptor) -> Result<usize> {
    transform_file(store, path, |mut map| {
        for value in map.values_mut() {
            *value = decryptor.decrypt_if_envelope(value)?;
        }
        Ok(map)
    })
}

/// Selected keys in a file whose values are still plaintext.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn plaintext_secrets(
    store: &dyn Store,
    path: &Path,
    selector: &KeySelector,
) -> Result<Vec<String>> {
    let document = Document::parse(&store.read_text(path)?);
    Ok(document
        .to_map()
        .into_iter()
        .filter(|(key, value)| selector.matches(key) && !is_envelope(value))
        .map(|(key, _)| key)
        .collect())
}

/// Outcome of running one operation over several files.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that succeeded, with the number of values changed.
    pub succeeded: Vec<(PathBuf, usize)>,
    /// Files that failed, with their error.
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    /// Total number of files attempted.
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether every file succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Aggregate error when any file failed.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Batch` if at least one file failed.
    pub fn into_result(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FileError::Batch {
                failed: self.failed.len(),
                total: self.total(),
            }
            .into())
        }
    }
}

/// Run `op` on every path, continuing past failures.
pub fn run_batch<F>(paths: &[PathBuf], mut op: F) -> BatchReport
where
    F: FnMut(&Path) -> Result<usize>,
{
    let mut report = BatchReport::default();

    for path in paths {
        match op(path) {
            Ok(changed) => report.succeeded.push((path.clone(), changed)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "file failed");
                report.failed.push((path.clone(), e));
            }
        }
    }

    debug!(
        total = report.total(),
        failed = report.failed.len(),
        "batch finished"
    );
    report
}
