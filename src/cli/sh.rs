//! Shell export commands.
//!
//! Output is meant for `eval "$(dotseal sh)"`, so only exports go to stdout.
//! Values are the text after `=` as written, with envelopes decrypted.

use tracing::debug;

use crate::cli::existing_files;
use crate::core::cipher::Decryptor;
use crate::core::config::Config;
use crate::core::load::{env_files, environment_name, read_files, shell_exports, ProcessEnv, Syntax};
use crate::core::store::Filesystem;
use crate::error::Result;

/// Print exports for the given files.
pub fn sh(files: Vec<String>, key: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let store = Filesystem;
    let paths = existing_files(&store, &config.files_or(files));
    print_exports(&paths, key)
}

/// Print exports for an environment's file chain, skipping missing files.
pub fn shenv(environment: Option<String>, key: Option<String>) -> Result<()> {
    let name = environment.or_else(|| environment_name(&ProcessEnv));
    debug!(environment = ?name, "resolving file chain");
    print_exports(&env_files(name.as_deref()), key)
}

fn print_exports(paths: &[std::path::PathBuf], key: Option<String>) -> Result<()> {
    let decryptor = Decryptor::new(key.as_deref())?;
    let values = read_files(&Filesystem, paths, &decryptor, Syntax::Raw)?;
    print!("{}", shell_exports(&values, &ProcessEnv));
    Ok(())
}
