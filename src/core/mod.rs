//! Core library components.
//!
//! Everything here is independent of the command line: the value codec, the
//! .env line transform, key selection, file storage and environment loading.

pub mod cipher;
pub mod config;
pub mod constants;
pub mod dotenv;
pub mod env;
pub mod files;
pub mod load;
pub mod pattern;
pub mod store;
pub mod types;
