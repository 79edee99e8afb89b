//! In-memory storage.
//!
//! Backs library tests and dry runs without touching disk.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Store;
use crate::error::{FileError, Result};

/// Files held in a map keyed by path.
#[derive(Debug, Default)]
pub struct Memory {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        self.files.borrow_mut().insert(path.into(), contents.into());
        self
    }

    /// Current contents of a file, if present.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }
}

impl Store for Memory {
    fn read_text(&self, path: &Path) -> Result<String> {
        self.get(path)
            .ok_or_else(|| FileError::NotFound(path.to_path_buf()).into())
    }

    fn write_text(&self, path: &Path, contents: &str) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
    }
}
