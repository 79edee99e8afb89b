//! Command-line interface.

pub mod check;
pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod generate_keys;
pub mod output;
pub mod sh;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::constants::{DECRYPTION_KEY_VAR, ENCRYPTION_KEY_VAR};
use crate::core::files::{partition_existing, BatchReport};
use crate::core::store::Store;
use crate::error::{CipherError, ConfigError, Error, FileError, Result};

/// Dotseal - encrypt secrets inside .env files so they can be committed.
#[derive(Parser)]
#[command(
    name = "dotseal",
    about = "Encrypt secrets inside .env files so they can be committed",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt secret values in place
    Encrypt {
        /// Files to encrypt (default: .env)
        files: Vec<String>,
        /// Public key (base64 SPKI)
        #[arg(short, long, env = ENCRYPTION_KEY_VAR, hide_env_values = true)]
        key: Option<String>,
        /// Keys to encrypt: exact names or /regex/ (default: /_SECRET$/)
        #[arg(short = 'e', long = "encrypt-keys", num_args = 1..)]
        encrypt_keys: Vec<String>,
    },

    /// Decrypt every encrypted value in place
    Decrypt {
        /// Files to decrypt (default: .env)
        files: Vec<String>,
        /// Private key (base64 PKCS#8)
        #[arg(short, long, env = DECRYPTION_KEY_VAR, hide_env_values = true)]
        key: Option<String>,
    },

    /// Print shell exports for the decrypted files
    Sh {
        /// Files to load, later ones override earlier ones (default: .env)
        files: Vec<String>,
        /// Private key (base64 PKCS#8)
        #[arg(short, long, env = DECRYPTION_KEY_VAR, hide_env_values = true)]
        key: Option<String>,
    },

    /// Print shell exports for an environment's .env file chain
    Shenv {
        /// Environment name (default: APP_ENV, or NODE_ENV=development)
        environment: Option<String>,
        /// Private key (base64 PKCS#8)
        #[arg(short, long, env = DECRYPTION_KEY_VAR, hide_env_values = true)]
        key: Option<String>,
    },

    /// Generate a new key pair
    GenerateKeys {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List secrets that are not encrypted yet
    Check {
        /// Files to check (default: .env)
        files: Vec<String>,
        /// Keys that must be encrypted: exact names or /regex/
        #[arg(short = 'e', long = "encrypt-keys", num_args = 1..)]
        encrypt_keys: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(command: Command) -> Result<()> {
    use Command::*;

    match command {
        Encrypt {
            files,
            key,
            encrypt_keys,
        } => encrypt::execute(files, key.as_deref(), &encrypt_keys),
        Decrypt { files, key } => decrypt::execute(files, key.as_deref()),
        Sh { files, key } => sh::sh(files, key),
        Shenv { environment, key } => sh::shenv(environment, key),
        GenerateKeys { json } => generate_keys::execute(json),
        Check {
            files,
            encrypt_keys,
            json,
        } => check::execute(files, &encrypt_keys, json),
        Completions { shell } => completions::execute(shell),
    }
}

/// Drop files that don't exist, reporting each on stderr.
pub(crate) fn existing_files(store: &dyn Store, files: &[String]) -> Vec<PathBuf> {
    let (found, missing) = partition_existing(store, files);
    for path in missing {
        output::error(&FileError::NotFound(path).to_string());
    }
    found
}

/// Print per-file results, then fail if any file failed.
pub(crate) fn finish_batch(report: BatchReport, verb: &str) -> Result<()> {
    for (path, changed) in &report.succeeded {
        let path = output::path(&path.display().to_string());
        match *changed {
            0 => output::dimmed(&format!("{}: nothing to {}", path, verb)),
            1 => output::success(&format!("{}: 1 value {}ed", path, verb)),
            n => output::success(&format!("{}: {} values {}ed", path, n, verb)),
        }
    }
    for (path, err) in &report.failed {
        output::error(&format!("{}: {}", path.display(), err));
    }
    if let Some(hint) = report.failed.iter().find_map(|(_, err)| hint_for(err)) {
        output::hint(hint);
    }

    report.into_result().map(|_| ())
}

/// Suggested next step for an error, if there is an obvious one.
pub fn hint_for(err: &Error) -> Option<&'static str> {
    match err {
        Error::Config(ConfigError::NoEncryptionKey { .. }) => {
            Some("pass --key, set CONFIG_ENCRYPTION_KEY, or run: dotseal generate-keys")
        }
        Error::Config(ConfigError::NoDecryptionKey) | Error::Cipher(CipherError::MissingKey) => {
            Some("pass --key or set CONFIG_DECRYPTION_KEY")
        }
        _ => None,
    }
}
