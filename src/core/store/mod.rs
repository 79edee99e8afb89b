//! File storage.
//!
//! Abstracts reading and writing of .env files so the transform pipeline can
//! run against the real filesystem or an in-memory map.
//!
//! ## Adding a New Storage Backend
//!
//! 1. Implement the `Store` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use std::path::Path;

use crate::error::Result;

mod fs;
mod memory;

pub use fs::Filesystem;
pub use memory::Memory;

/// Text file storage trait.
pub trait Store {
    /// Read a whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `FileError::NotFound` if the file does not exist, or
    /// `FileError::Read` if it cannot be read.
    fn read_text(&self, path: &Path) -> Result<String>;

    /// Replace a file's contents.
    ///
    /// Implementations must not leave a partially written file behind.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Write` if the file cannot be written.
    fn write_text(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if a file exists.
    fn exists(&self, path: &Path) -> bool;
}
