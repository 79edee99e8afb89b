//! Filesystem storage implementation.
//!
//! Writes go through a temp file in the target's directory followed by a
//! rename, so a crash leaves either the old file or the new one.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::trace;

use super::Store;
use crate::error::{FileError, Result};

/// Local filesystem storage.
#[derive(Debug, Clone, Copy, Default)]
pub struct Filesystem;

impl Store for Filesystem {
    fn read_text(&self, path: &Path) -> Result<String> {
        trace!(path = %path.display(), "reading");

        fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FileError::NotFound(path.to_path_buf()).into()
            } else {
                FileError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
                .into()
            }
        })
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        trace!(path = %path.display(), bytes = contents.len(), "writing");

        let write_err = |source: std::io::Error| FileError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(contents.as_bytes()).map_err(write_err)?;
        temp.flush().map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;

        // Keep the existing file's mode; a temp file starts out 0600.
        if let Ok(metadata) = fs::metadata(path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(write_err)?;
        }

        temp.persist(path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
